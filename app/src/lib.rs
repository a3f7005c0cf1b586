//! # EduQuiz Signup Shell
//!
//! Interactive front end for the signup form: configuration loading, logging
//! setup, the message catalogue and a line-command driver over the form.

pub mod commands;
pub mod config;
pub mod driver;
pub mod i18n;
pub mod logging;

pub use commands::{Channel, Command, CommandError};
pub use driver::{Driver, Step};
pub use i18n::{Catalogue, ShellMessages};
