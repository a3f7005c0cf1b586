//! Unit tests for channel error classification

use crate::errors::{ChannelError, ChannelErrorKind, DomainError, StatusMessages};

fn table() -> StatusMessages {
    StatusMessages::new("Check the format", "Already registered", "Please try again later")
}

#[test]
fn test_kind_by_status() {
    assert_eq!(ChannelError::new(400, "bad").kind(), ChannelErrorKind::BadFormat);
    assert_eq!(ChannelError::new(409, "dup").kind(), ChannelErrorKind::Conflict);
    assert_eq!(ChannelError::new(500, "boom").kind(), ChannelErrorKind::Other);
    assert_eq!(ChannelError::new(404, "gone").kind(), ChannelErrorKind::Other);
    assert_eq!(ChannelError::transport("timeout").kind(), ChannelErrorKind::Other);
}

#[test]
fn test_status_message_lookup() {
    let messages = table();
    assert_eq!(messages.message_for(&ChannelError::bad_format("x")), "Check the format");
    assert_eq!(messages.message_for(&ChannelError::conflict("x")), "Already registered");
    assert_eq!(
        messages.message_for(&ChannelError::transport("connection refused")),
        "Please try again later"
    );
}

#[test]
fn test_domain_error_bridges_channel_error() {
    let error: DomainError = ChannelError::conflict("email already registered").into();
    assert_eq!(error.to_string(), "email already registered");
    assert!(matches!(error, DomainError::Channel(_)));
}
