//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the account API and sign-out endpoints under a single
//! Axum router. Everything else falls through to the static site root, which
//! holds the compiled client, `interop.js` and the stylesheet.

pub mod account;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/account/login", post(account::login))
        .route("/api/account/register", post(account::register))
        .route("/api/account/me", get(account::me))
        .route(account::CONFIRM_EMAIL_PATH, get(account::confirm_email))
        .route(account::LOGOUT_PAGE, get(account::logout_page).post(account::logout))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full application: API routes plus the static client. Unknown paths serve
/// `index.html` so client-side routes survive a reload.
pub fn app(state: AppState, site_root: &Path) -> Router {
    let site = ServeDir::new(site_root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(site_root.join("index.html")));

    api_routes(state)
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
