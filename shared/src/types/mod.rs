//! Type definitions shared between the client crates

pub mod language;

pub use language::Language;
