//! In-process backend for development
//!
//! Codes are generated and checked locally and written to the log instead of
//! being delivered, so the whole signup can be walked through offline.

pub mod backend;
pub mod channels;


pub use backend::MockBackend;
pub use channels::{MockEmailChannel, MockNicknameChecker, MockSignupApi, MockSmsChannel};
