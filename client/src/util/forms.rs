//! Client-side checks run before a form is posted.
//!
//! These only catch what the browser can know (blank fields, mismatched
//! confirmation). Everything else is decided by the server and comes back as
//! `FieldErrors`.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::net::types::SubmitError;
use crate::validation::{FieldErrors, ServerSideValidator};

/// Field name used for errors that belong to the form as a whole.
pub const FORM_FIELD: &str = "";

#[must_use]
pub fn required_message(field_name: &str) -> String {
    format!("The {field_name} field is required.")
}

/// One "required" error for every field whose value is blank.
#[must_use]
pub fn required_errors(fields: &[(&str, &str)]) -> FieldErrors {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| ((*name).to_owned(), vec![required_message(name)]))
        .collect()
}

/// Error for `ConfirmPassword` when it does not match `Password`.
#[must_use]
pub fn confirmation_error(password: &str, confirm: &str) -> Option<FieldErrors> {
    if password == confirm {
        return None;
    }
    let mut errors = FieldErrors::new();
    errors.insert(
        "ConfirmPassword".to_owned(),
        vec!["The password and confirmation password do not match.".to_owned()],
    );
    Some(errors)
}

/// Single form-level error, used for transport failures.
#[must_use]
pub fn form_error(message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(FORM_FIELD.to_owned(), vec![message.into()]);
    errors
}

/// Surface a failed form post on the form: field errors go to their fields,
/// anything else becomes a form-level error.
pub fn show_submit_error(validator: &ServerSideValidator, error: SubmitError) {
    match error {
        SubmitError::Rejected(errors) => validator.display_errors(&errors),
        SubmitError::Transport(message) => validator.display_errors(&form_error(message)),
    }
}

/// Queue client-side errors through the batch API and notify once.
/// Returns `true` if anything was added.
pub fn show_client_errors(validator: &ServerSideValidator, errors: &FieldErrors) -> bool {
    let edit_context = validator.edit_context();
    for (field_name, messages) in errors {
        let field = edit_context.field(field_name);
        for message in messages {
            validator.add_error(&field, message.clone());
        }
    }
    if errors.is_empty() {
        return false;
    }
    validator.notify_changed();
    true
}
