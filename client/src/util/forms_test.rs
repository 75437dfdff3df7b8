use super::*;

#[test]
fn required_errors_flags_blank_fields_only() {
    let errors = required_errors(&[("Email", "  "), ("Password", "secret")]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["Email"], vec!["The Email field is required.".to_owned()]);
}

#[test]
fn required_errors_empty_when_all_present() {
    assert!(required_errors(&[("Email", "a@b.com"), ("Password", "x")]).is_empty());
}

#[test]
fn confirmation_error_only_on_mismatch() {
    assert!(confirmation_error("abc123", "abc123").is_none());
    let errors = confirmation_error("abc123", "abc124").unwrap();
    assert!(errors.contains_key("ConfirmPassword"));
}

#[test]
fn form_error_uses_form_level_field() {
    let errors = form_error("request failed: 500");
    assert_eq!(errors[FORM_FIELD], vec!["request failed: 500".to_owned()]);
}

// =============================================================
// Surfacing errors on a form
// =============================================================

use crate::validation::{EditContext, ModelRef};

fn attached() -> (EditContext, ServerSideValidator) {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    (ctx, validator)
}

#[test]
fn rejected_submit_lands_on_fields() {
    let (ctx, validator) = attached();
    let mut errors = FieldErrors::new();
    errors.insert("Email".to_owned(), vec!["Already in use".to_owned()]);
    show_submit_error(&validator, SubmitError::Rejected(errors));
    assert_eq!(ctx.messages_for(&ctx.field("Email")), vec!["Already in use".to_owned()]);
}

#[test]
fn transport_failure_is_form_level() {
    let (ctx, validator) = attached();
    show_submit_error(&validator, SubmitError::Transport("request failed: 502".to_owned()));
    assert_eq!(ctx.messages_for(&ctx.field(FORM_FIELD)), vec!["request failed: 502".to_owned()]);
}

#[test]
fn client_errors_are_batched() {
    let (ctx, validator) = attached();
    assert!(!show_client_errors(&validator, &FieldErrors::new()));
    let errors = required_errors(&[("Email", ""), ("Password", "")]);
    assert!(show_client_errors(&validator, &errors));
    assert_eq!(ctx.validation_messages().len(), 2);
}
