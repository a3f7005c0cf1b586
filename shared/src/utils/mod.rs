//! Common utility functions

pub mod email;
pub mod phone;
pub mod validation;

// Re-export commonly used utilities
pub use email::*;
pub use phone::*;
pub use validation::*;
