//! Unit tests for the field registry and observed values

use crate::domain::entities::form_field::{FieldState, FieldStatus, FormFields, FormValue};

#[test]
fn test_unknown_field_is_default() {
    let fields = FormFields::new();
    assert_eq!(fields.status("email"), FieldStatus::default());
    assert_eq!(fields.state("email"), FieldState::Default);
    assert!(fields.message("email").is_none());
}

#[test]
fn test_set_and_clear() {
    let fields = FormFields::new();
    fields.set_error("email", "Invalid email");
    assert_eq!(fields.state("email"), FieldState::Error);
    assert_eq!(fields.message("email").as_deref(), Some("Invalid email"));

    fields.set_success("emailCode", "Verified");
    fields.set_info("smsCode", "Code sent");
    assert_eq!(fields.state("smsCode"), FieldState::Default);
    assert_eq!(fields.snapshot().len(), 3);

    fields.clear_many(["email", "emailCode"]);
    assert_eq!(fields.state("email"), FieldState::Default);
    assert_eq!(fields.snapshot().len(), 1);
}

#[test]
fn test_set_state_keeps_message() {
    let fields = FormFields::new();
    fields.set_info("email", "Code sent");
    fields.set_state("email", FieldState::Success);
    assert_eq!(fields.state("email"), FieldState::Success);
    assert_eq!(fields.message("email").as_deref(), Some("Code sent"));
}

#[test]
fn test_clones_share_registry() {
    let fields = FormFields::new();
    let clone = fields.clone();
    clone.set_error("nickname", "Taken");
    assert_eq!(fields.state("nickname"), FieldState::Error);
}

#[test]
fn test_form_value_notifies_only_on_change() {
    let value = FormValue::new("a@example.com");
    let mut rx = value.subscribe();
    assert!(!rx.has_changed().unwrap());

    value.set("a@example.com");
    assert!(!rx.has_changed().unwrap());

    value.set("b@example.com");
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), "b@example.com");
    assert_eq!(value.get(), "b@example.com");
}
