//! Form validation display components.
//!
//! DESIGN
//! ======
//! `provide_edit_context` publishes a form's `EditContext` plus a version
//! signal that ticks whenever the context reports a field or validation-state
//! change. Message components read the context on every tick, so they always
//! show what the message stores hold right now.

use leptos::prelude::*;

use crate::validation::EditContext;

/// Reactive tick for one form's validation state.
#[derive(Clone, Copy)]
pub struct ValidationVersion(RwSignal<u64>);

impl ValidationVersion {
    fn bump(self) {
        self.0.update(|v| *v = v.wrapping_add(1));
    }

    fn track(self) {
        self.0.track();
    }
}

/// Provide `edit_context` to descendants and keep display components in sync
/// with it for as long as the current owner lives.
pub fn provide_edit_context(edit_context: &EditContext) {
    let version = ValidationVersion(RwSignal::new(0));
    let subscriptions = vec![
        edit_context.on_validation_state_changed(move || version.bump()),
        edit_context.on_field_changed(move |_| version.bump()),
    ];
    provide_context(edit_context.clone());
    provide_context(version);
    on_cleanup(move || drop(subscriptions));
}

/// Messages for a single field of the enclosing form.
#[component]
pub fn ValidationMessage(#[prop(into)] field: String) -> impl IntoView {
    let edit_context = expect_context::<EditContext>();
    let version = expect_context::<ValidationVersion>();
    let field = edit_context.field(&field);

    move || {
        version.track();
        edit_context
            .messages_for(&field)
            .into_iter()
            .map(|message| view! { <div class="validation-message">{message}</div> })
            .collect_view()
    }
}

/// Every message of the enclosing form, as a list.
#[component]
pub fn ValidationSummary() -> impl IntoView {
    let edit_context = expect_context::<EditContext>();
    let version = expect_context::<ValidationVersion>();

    move || {
        version.track();
        let messages = edit_context.validation_messages();
        (!messages.is_empty()).then(|| {
            view! {
                <ul class="validation-errors">
                    {messages
                        .into_iter()
                        .map(|message| view! { <li class="validation-message">{message}</li> })
                        .collect_view()}
                </ul>
            }
        })
    }
}
