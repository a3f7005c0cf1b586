//! Domain entities shared by the signup services.

pub mod countdown_timer;
pub mod form_field;
pub mod modal_stack;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use countdown_timer::{format_mm_ss, CountdownTimer};
pub use form_field::{FieldState, FieldStatus, FormFields, FormValue};
pub use modal_stack::{ModalId, ModalLayer, ModalStack, DEFAULT_BASE_Z_INDEX};
