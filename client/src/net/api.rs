//! REST helpers for the account API.
//!
//! Browser (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! A 422 response is decoded into `SubmitError::Rejected` with the server's
//! field errors; every other failure collapses to `SubmitError::Transport`
//! with a short message fit for a form summary.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LoginRequest, RegisterRequest, Registered, SubmitError, User};
#[cfg(any(test, feature = "csr"))]
use super::types::ValidationProblem;

pub const LOGIN_ENDPOINT: &str = "/api/account/login";
pub const REGISTER_ENDPOINT: &str = "/api/account/register";
pub const ME_ENDPOINT: &str = "/api/account/me";
pub const LOGOUT_PATH: &str = "/account/logout";

#[cfg(any(test, feature = "csr"))]
const UNPROCESSABLE_ENTITY: u16 = 422;

#[cfg(any(test, feature = "csr"))]
fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Map a non-OK response to the error a form should show.
#[cfg(any(test, feature = "csr"))]
fn submit_error(status: u16, body: &str) -> SubmitError {
    if status == UNPROCESSABLE_ENTITY {
        if let Ok(problem) = serde_json::from_str::<ValidationProblem>(body) {
            return SubmitError::Rejected(problem.errors);
        }
    }
    SubmitError::Transport(request_failed_message(status))
}

/// Decode a registration body; an empty or unexpected body counts as a
/// plain success.
#[cfg(any(test, feature = "csr"))]
fn registered_from(body: &str) -> Registered {
    serde_json::from_str(body).unwrap_or_default()
}

#[cfg(feature = "csr")]
async fn post_form<T: serde::Serialize>(url: &str, payload: &T) -> Result<String, SubmitError> {
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .map_err(|e| SubmitError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Transport(e.to_string()))?;
    let body = resp.text().await.unwrap_or_default();
    if resp.ok() {
        return Ok(body);
    }
    Err(submit_error(resp.status(), &body))
}

/// Fetch the signed-in account from `/api/account/me`.
/// Returns `None` if not authenticated or outside the browser.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(ME_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Sign in via `POST /api/account/login`. The session cookie is set by the
/// server response.
///
/// # Errors
///
/// Returns `SubmitError::Rejected` with field errors when the server refuses
/// the credentials, or `SubmitError::Transport` for any other failure.
pub async fn login(request: &LoginRequest) -> Result<(), SubmitError> {
    #[cfg(feature = "csr")]
    {
        post_form(LOGIN_ENDPOINT, request).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
        Err(SubmitError::Transport("not available outside the browser".to_owned()))
    }
}

/// Create an account via `POST /api/account/register`.
///
/// The result carries the confirmation link when the account still has to
/// be confirmed.
///
/// # Errors
///
/// Returns `SubmitError::Rejected` with field errors (e.g. an email already in
/// use), or `SubmitError::Transport` for any other failure.
pub async fn register(request: &RegisterRequest) -> Result<Registered, SubmitError> {
    #[cfg(feature = "csr")]
    {
        post_form(REGISTER_ENDPOINT, request).await.map(|body| registered_from(&body))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
        Err(SubmitError::Transport("not available outside the browser".to_owned()))
    }
}
