//! Landing page for a signed-in user, with sign-out.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::interop::Interop;
use crate::net::api::LOGOUT_PATH;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::document;

/// Where the browser lands after signing out.
pub const AFTER_LOGOUT: &str = "/login";

/// Logout form target. `return_url` must be a local path; it is
/// percent-encoded into the query.
#[must_use]
pub fn logout_action(return_url: &str) -> String {
    format!("{LOGOUT_PATH}?returnUrl={}", urlencoding::encode(return_url))
}

#[component]
pub fn HomePage() -> impl IntoView {
    let interop = expect_context::<Interop>();
    let auth = expect_context::<RwSignal<AuthState>>();
    document::set_page_title(&interop, "Home");
    install_unauth_redirect(auth, use_navigate());

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        {
            let interop = interop.clone();
            leptos::task::spawn_local(async move {
                let fields = std::collections::BTreeMap::<String, String>::new();
                let _ = interop.submit_form(&logout_action(AFTER_LOGOUT), &fields).await;
            });
        }
    };

    view! {
        <div class="home-page">
            <h1>"Welcome"</h1>
            <Show when=move || auth.get().user.is_some() fallback=|| view! { <p>"Loading..."</p> }>
                <p class="home-page__user">
                    "Signed in as " <strong>{move || auth.get().email().unwrap_or_default().to_owned()}</strong>
                </p>
            </Show>
            <button class="login-button" on:click=on_logout>
                "Log out"
            </button>
        </div>
    }
}
