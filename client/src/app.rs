//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::interop::Interop;
use crate::pages::{home::HomePage, login::LoginPage, register::RegisterPage};
use crate::state::auth::AuthState;
use crate::util::{auth::load_current_user, document};

/// Root application component.
///
/// Provides the interop bridge and auth state, injects the site head and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    let interop = Interop::browser();
    document::install_head(&interop);
    provide_context(interop);

    let auth = RwSignal::new(AuthState::loading());
    provide_context(auth);
    load_current_user(auth);

    view! {
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}
