use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn errors(entries: &[(&str, &[&str])]) -> FieldErrors {
    entries
        .iter()
        .map(|(field, messages)| ((*field).to_owned(), messages.iter().map(|m| (*m).to_owned()).collect()))
        .collect()
}

fn notifications(ctx: &EditContext) -> (Arc<AtomicUsize>, Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let sub = ctx.on_validation_state_changed(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });
    (count, sub)
}

// =============================================================
// display_errors
// =============================================================

#[test]
fn display_errors_stores_message_under_field() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["Already in use"])]));
    assert_eq!(validator.store().messages_for(&ctx.field("Email")), vec!["Already in use".to_owned()]);
    assert_eq!(ctx.messages_for(&ctx.field("Email")), vec!["Already in use".to_owned()]);
}

#[test]
fn display_errors_notifies_once_per_call() {
    let ctx = EditContext::new(ModelRef::new());
    let (count, _sub) = notifications(&ctx);
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["a", "b"]), ("Password", &["c"])]));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.validation_messages().len(), 3);
}

#[test]
fn display_errors_accepts_unknown_field_names() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("", &["Invalid login attempt."])]));
    assert_eq!(ctx.messages_for(&ctx.field("")), vec!["Invalid login attempt.".to_owned()]);
}

#[test]
fn repeated_display_errors_accumulate_until_cleared() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["one"])]));
    validator.display_errors(&errors(&[("Email", &["two"])]));
    assert_eq!(ctx.messages_for(&ctx.field("Email")), vec!["one".to_owned(), "two".to_owned()]);
}

// =============================================================
// Event-driven clears
// =============================================================

#[test]
fn field_change_clears_only_that_field() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["Already in use"]), ("Password", &["Too short"])]));

    ctx.notify_field_changed(&ctx.field("Email"));

    assert!(ctx.messages_for(&ctx.field("Email")).is_empty());
    assert_eq!(ctx.messages_for(&ctx.field("Password")), vec!["Too short".to_owned()]);
}

#[test]
fn validation_request_clears_everything() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["x"]), ("Password", &["y"]), ("Other", &["z"])]));
    assert!(ctx.validate());
    assert!(validator.store().is_empty());
}

#[test]
fn clear_then_add_within_one_interaction() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["stale"])]));
    ctx.validate();
    validator.display_errors(&errors(&[("Email", &["fresh"])]));
    assert_eq!(ctx.messages_for(&ctx.field("Email")), vec!["fresh".to_owned()]);
}

// =============================================================
// Single-error API
// =============================================================

#[test]
fn add_error_batches_without_notifying() {
    let ctx = EditContext::new(ModelRef::new());
    let (count, _sub) = notifications(&ctx);
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.add_error(&ctx.field("Email"), "Required");
    validator.add_error(&ctx.field("Password"), "Required");
    assert_eq!(count.load(Ordering::SeqCst), 0);
    validator.notify_changed();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.validation_messages().len(), 2);
}

#[test]
fn add_model_error_resolves_field_and_notifies() {
    let model = ModelRef::new();
    let ctx = EditContext::new(model);
    let (count, _sub) = notifications(&ctx);
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.add_model_error(model, "Email", "Not confirmed");
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.messages_for(&ctx.field("Email")), vec!["Not confirmed".to_owned()]);
}

#[test]
fn add_model_error_for_foreign_model_is_a_distinct_field() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    let other = ModelRef::new();
    validator.add_model_error(other, "Email", "x");
    assert!(ctx.messages_for(&ctx.field("Email")).is_empty());
    assert_eq!(ctx.messages_for(&FieldIdentifier::new(other, "Email")), vec!["x".to_owned()]);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn reattach_stops_reacting_to_old_context() {
    let old = EditContext::new(ModelRef::new());
    let new = EditContext::new(ModelRef::new());
    let mut validator = ServerSideValidator::attach(Some(&old)).unwrap();
    assert_eq!(old.handler_count(), 2);

    validator.reattach(Some(&new)).unwrap();
    assert_eq!(old.handler_count(), 0);
    assert_eq!(new.handler_count(), 2);

    validator.display_errors(&errors(&[("Email", &["x"])]));
    assert!(old.validation_messages().is_empty());
    assert_eq!(new.messages_for(&new.field("Email")), vec!["x".to_owned()]);

    old.validate();
    assert!(!validator.store().is_empty());
    assert!(new.validate());
    assert!(validator.store().is_empty());
}

#[test]
fn reattach_without_context_keeps_current_binding() {
    let ctx = EditContext::new(ModelRef::new());
    let mut validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["x"])]));
    assert!(validator.reattach(None).is_err());
    assert_eq!(ctx.handler_count(), 2);
    assert_eq!(ctx.messages_for(&ctx.field("Email")), vec!["x".to_owned()]);
}

#[test]
fn dropping_validator_detaches_and_removes_messages() {
    let ctx = EditContext::new(ModelRef::new());
    let validator = ServerSideValidator::attach(Some(&ctx)).unwrap();
    validator.display_errors(&errors(&[("Email", &["x"])]));
    drop(validator);
    assert_eq!(ctx.handler_count(), 0);
    assert!(ctx.validation_messages().is_empty());
}
