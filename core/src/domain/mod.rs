//! Domain layer: the timer, form field and modal stack building blocks the
//! services compose.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
