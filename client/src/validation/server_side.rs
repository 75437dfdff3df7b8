//! Adapter that surfaces server-computed field errors in a form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server answers a rejected form post with a `FieldErrors` map. Pages
//! hand that map to a `ServerSideValidator`, which writes it into its own
//! message store on the form's `EditContext` and asks the form to re-render.
//!
//! LIFECYCLE
//! =========
//! `attach` requires an `EditContext`; without one it fails loudly since the
//! validator was placed outside any form. Once attached it clears all its
//! messages whenever validation is requested and clears a field's messages
//! whenever that field changes, so stale server errors never outlive the next
//! user interaction. `reattach` drops the old subscriptions before binding
//! the new context.

#[cfg(test)]
#[path = "server_side_test.rs"]
mod server_side_test;

use super::{EditContext, FieldErrors, FieldIdentifier, ModelRef, Subscription, ValidationError, ValidationMessageStore};

const COMPONENT: &str = "ServerSideValidator";
const DEPENDENCY: &str = "EditContext";

pub struct ServerSideValidator {
    edit_context: EditContext,
    store: ValidationMessageStore,
    subscriptions: Vec<Subscription>,
}

impl ServerSideValidator {
    /// Bind to `edit_context`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingEditContext` when no context is given.
    pub fn attach(edit_context: Option<&EditContext>) -> Result<Self, ValidationError> {
        let edit_context = require(edit_context)?;
        let store = ValidationMessageStore::new(edit_context);
        let subscriptions = subscribe(edit_context, &store);
        Ok(Self { edit_context: edit_context.clone(), store, subscriptions })
    }

    /// Move to a new context, replacing the message store. The previous
    /// context stops reaching this validator before the new one is bound.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingEditContext` when no context is given;
    /// the current binding is left untouched in that case.
    pub fn reattach(&mut self, edit_context: Option<&EditContext>) -> Result<(), ValidationError> {
        let edit_context = require(edit_context)?;
        self.subscriptions.clear();
        self.store = ValidationMessageStore::new(edit_context);
        self.subscriptions = subscribe(edit_context, &self.store);
        self.edit_context = edit_context.clone();
        Ok(())
    }

    #[must_use]
    pub fn edit_context(&self) -> &EditContext {
        &self.edit_context
    }

    #[must_use]
    pub fn store(&self) -> &ValidationMessageStore {
        &self.store
    }

    /// Add every message in `errors` under its field on this form's model,
    /// then notify the form once. Names the form does not know are kept.
    pub fn display_errors(&self, errors: &FieldErrors) {
        for (field_name, messages) in errors {
            self.store.add_range(&self.edit_context.field(field_name), messages.iter().cloned());
        }
        self.edit_context.notify_validation_state_changed();
    }

    /// Re-broadcast the current validation state after a batch of
    /// [`add_error`](Self::add_error) calls.
    pub fn notify_changed(&self) {
        self.edit_context.notify_validation_state_changed();
    }

    /// Add one message without notifying.
    pub fn add_error(&self, field: &FieldIdentifier, message: impl Into<String>) {
        self.store.add(field, message);
    }

    /// Add one message for `field_name` on `model` and notify immediately.
    pub fn add_model_error(&self, model: ModelRef, field_name: &str, message: impl Into<String>) {
        self.store.add(&FieldIdentifier::new(model, field_name), message);
        self.edit_context.notify_validation_state_changed();
    }
}

fn require(edit_context: Option<&EditContext>) -> Result<&EditContext, ValidationError> {
    edit_context.ok_or(ValidationError::MissingEditContext { component: COMPONENT, expected: DEPENDENCY })
}

fn subscribe(edit_context: &EditContext, store: &ValidationMessageStore) -> Vec<Subscription> {
    let on_validate = store.clone();
    let on_change = store.clone();
    vec![
        edit_context.on_validation_requested(move || on_validate.clear()),
        edit_context.on_field_changed(move |field| on_change.clear_field(field)),
    ]
}

impl std::fmt::Debug for ServerSideValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(COMPONENT)
            .field("edit_context", &self.edit_context)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
