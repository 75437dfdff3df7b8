//! Registration page. The server decides whether the email is free and the
//! password acceptable; its answer is shown field by field.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::validation::{ValidationMessage, ValidationSummary, provide_edit_context};
use crate::interop::Interop;
use crate::net::types::{RegisterRequest, Registered};
use crate::util::{document, forms};
use crate::validation::{EditContext, FieldErrors, ModelRef, use_server_side_validator};

pub(crate) fn build_register_request(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterRequest, FieldErrors> {
    let email = email.trim();
    let mut errors = forms::required_errors(&[
        ("Email", email),
        ("Password", password),
        ("ConfirmPassword", confirm_password),
    ]);
    if errors.is_empty() {
        if let Some(mismatch) = forms::confirmation_error(password, confirm_password) {
            errors.extend(mismatch);
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(RegisterRequest {
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm_password.to_owned(),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let interop = expect_context::<Interop>();
    document::set_page_title(&interop, "Register");

    let edit_context = EditContext::new(ModelRef::new());
    provide_edit_context(&edit_context);
    let validator = match use_server_side_validator() {
        Ok(validator) => Arc::new(validator),
        Err(e) => return view! { <p class="form-error">{e.to_string()}</p> }.into_any(),
    };

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let registered = RwSignal::new(None::<Registered>);
    let busy = RwSignal::new(false);

    let input_handler = |signal: RwSignal<String>, name: &str| {
        let ctx = edit_context.clone();
        let field = edit_context.field(name);
        move |ev: leptos::ev::Event| {
            signal.set(event_target_value(&ev));
            ctx.notify_field_changed(&field);
        }
    };
    let on_email_input = input_handler(email, "Email");
    let on_password_input = input_handler(password, "Password");
    let on_confirm_input = input_handler(confirm, "ConfirmPassword");

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        edit_context.validate();

        let request =
            match build_register_request(&email.get_untracked(), &password.get_untracked(), &confirm.get_untracked()) {
                Ok(request) => request,
                Err(errors) => {
                    forms::show_client_errors(&validator, &errors);
                    return;
                }
            };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let validator = Arc::clone(&validator);
            leptos::task::spawn_local(async move {
                match crate::net::api::register(&request).await {
                    Ok(done) => registered.set(Some(done)),
                    Err(e) => forms::show_submit_error(&validator, e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, registered);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create a new account"</h1>
                <Show
                    when=move || registered.with(Option::is_some)
                    fallback=move || view! {
                        <form class="login-form" on:submit=on_submit.clone()>
                            <ValidationSummary/>
                            <label for="register-email">"Email"</label>
                            <input
                                id="register-email"
                                class="login-input"
                                type="email"
                                name="Email"
                                prop:value=move || email.get()
                                on:input=on_email_input.clone()
                            />
                            <ValidationMessage field="Email"/>
                            <label for="register-password">"Password"</label>
                            <input
                                id="register-password"
                                class="login-input"
                                type="password"
                                name="Password"
                                prop:value=move || password.get()
                                on:input=on_password_input.clone()
                            />
                            <ValidationMessage field="Password"/>
                            <label for="register-confirm">"Confirm password"</label>
                            <input
                                id="register-confirm"
                                class="login-input"
                                type="password"
                                name="ConfirmPassword"
                                prop:value=move || confirm.get()
                                on:input=on_confirm_input.clone()
                            />
                            <ValidationMessage field="ConfirmPassword"/>
                            <button class="login-button" type="submit" disabled=move || busy.get()>
                                "Register"
                            </button>
                        </form>
                    }
                >
                    {move || match registered.get().and_then(|r| r.confirmation_url) {
                        Some(url) => view! {
                            <p class="login-message">
                                "Account created. "
                                <a href=url>"Click here to confirm your account"</a>
                                ", then "
                                <a href="/login">"log in"</a>
                                "."
                            </p>
                        }
                        .into_any(),
                        None => view! {
                            <p class="login-message">
                                "Account created. You can now "
                                <a href="/login">"log in"</a>
                                "."
                            </p>
                        }
                        .into_any(),
                    }}
                </Show>
            </div>
        </div>
    }
    .into_any()
}
