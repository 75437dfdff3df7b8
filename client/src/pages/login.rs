//! Login page: email + password with server-side error display.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::validation::{ValidationMessage, ValidationSummary, provide_edit_context};
use crate::interop::Interop;
use crate::net::types::LoginRequest;
use crate::util::{document, forms};
use crate::validation::{EditContext, FieldErrors, ModelRef, use_server_side_validator};

/// Trim and check the raw inputs, producing either a request or the
/// client-side errors to show.
pub(crate) fn build_login_request(email: &str, password: &str, remember_me: bool) -> Result<LoginRequest, FieldErrors> {
    let email = email.trim();
    let errors = forms::required_errors(&[("Email", email), ("Password", password)]);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned(), remember_me })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let interop = expect_context::<Interop>();
    document::set_page_title(&interop, "Log in");

    let edit_context = EditContext::new(ModelRef::new());
    provide_edit_context(&edit_context);
    let validator = match use_server_side_validator() {
        Ok(validator) => Arc::new(validator),
        Err(e) => return view! { <p class="form-error">{e.to_string()}</p> }.into_any(),
    };

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember_me = RwSignal::new(false);
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let interop = interop.clone();
        leptos::task::spawn_local(async move {
            let last = interop.get_cookie(document::LAST_EMAIL_COOKIE).await.into_value();
            if !last.is_empty() && email.get_untracked().is_empty() {
                email.set(last);
            }
        });
    }

    let email_field = edit_context.field("Email");
    let password_field = edit_context.field("Password");
    let on_email_input = {
        let ctx = edit_context.clone();
        move |ev: leptos::ev::Event| {
            email.set(event_target_value(&ev));
            ctx.notify_field_changed(&email_field);
        }
    };
    let on_password_input = {
        let ctx = edit_context.clone();
        move |ev: leptos::ev::Event| {
            password.set(event_target_value(&ev));
            ctx.notify_field_changed(&password_field);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        // Drops server errors from the previous attempt.
        edit_context.validate();

        let request = match build_login_request(&email.get_untracked(), &password.get_untracked(), remember_me.get_untracked()) {
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
            let interop = interop.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&request).await {
                    Ok(()) => {
                        if request.remember_me {
                            let _ = interop
                                .set_cookie(document::LAST_EMAIL_COOKIE, &request.email, document::LAST_EMAIL_DAYS)
                                .await;
                        }
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
                        }
                    }
                    Err(e) => {
                        forms::show_submit_error(&validator, e);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Log in"</h1>
                <form class="login-form" on:submit=on_submit>
                    <ValidationSummary/>
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="login-input"
                        type="email"
                        name="Email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=on_email_input
                    />
                    <ValidationMessage field="Email"/>
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        class="login-input"
                        type="password"
                        name="Password"
                        prop:value=move || password.get()
                        on:input=on_password_input
                    />
                    <ValidationMessage field="Password"/>
                    <label class="login-remember">
                        <input
                            type="checkbox"
                            prop:checked=move || remember_me.get()
                            on:change=move |ev| remember_me.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Log in"
                    </button>
                </form>
                <p class="login-card__subtitle">
                    <a href="/register">"Register as a new user"</a>
                </p>
            </div>
        </div>
    }
    .into_any()
}
