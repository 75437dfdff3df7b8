//! Account routes: password sign-in, registration, email confirmation,
//! current user, sign-out.
//!
//! ERROR HANDLING
//! ==============
//! Anything the user can correct is answered with 422 and a body of
//! `{"errors": {field: [message, ...]}}`, which the client feeds straight
//! into its form validator. Store failures are logged and answered with 500.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use crate::services::identity::{self, FieldErrors, IdentityError, Registration, SignInResult};
use crate::services::session::SessionUser;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
pub(crate) const LOGOUT_PAGE: &str = "/account/logout";
pub(crate) const CONFIRM_EMAIL_PATH: &str = "/account/confirm-email";
const REMEMBER_ME_DAYS: i64 = 30;

/// Form-level errors use the empty field name.
const FORM_FIELD: &str = "";
pub(crate) const INVALID_LOGIN_MESSAGE: &str = "Invalid login attempt.";
pub(crate) const NOT_ALLOWED_MESSAGE: &str = "You must confirm your email before you can sign in.";

const SIGNED_OUT_HTML: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Log out</title></head>\
<body><h1>Log out</h1><p>You have successfully logged out of the application.</p>\
<p><a href=\"/login\">Log in again</a></p></body></html>";

const CONFIRMED_HTML: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Confirm email</title></head>\
<body><h1>Confirm email</h1><p>Thank you for confirming your email.</p>\
<p><a href=\"/login\">Log in</a></p></body></html>";

const CONFIRM_FAILED_HTML: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Confirm email</title></head>\
<body><h1>Confirm email</h1><p>Error confirming your email.</p></body></html>";

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(token: String, secure: bool, remember_me: bool) -> Cookie<'static> {
    let cookie = Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    if remember_me {
        cookie.max_age(Duration::days(REMEMBER_ME_DAYS)).build()
    } else {
        cookie.build()
    }
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn unprocessable(errors: &FieldErrors) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(serde_json::json!({ "errors": errors }))).into_response()
}

fn form_error(message: &str) -> Response {
    let mut errors = FieldErrors::new();
    errors.insert(FORM_FIELD.to_owned(), vec![message.to_owned()]);
    unprocessable(&errors)
}

/// Only same-site relative paths may be redirected to after sign-out.
pub(crate) fn is_local_url(url: &str) -> bool {
    if url.chars().any(char::is_control) {
        return false;
    }
    let mut chars = url.chars();
    match (chars.next(), chars.next()) {
        (Some('/'), None) => true,
        (Some('/'), Some(second)) => second != '/' && second != '\\',
        _ => false,
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = app_state
            .identity
            .validate_session(token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// `POST /api/account/login`: check credentials and set the session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(req): Json<LoginRequest>) -> Response {
    match identity::password_sign_in(state.identity.as_ref(), &state.options, &req.email, &req.password).await {
        Ok(SignInResult::Succeeded { token, user }) => {
            tracing::info!(user_id = %user.id, "user logged in");
            let jar = jar.add(session_cookie(token, state.cookie_secure, req.remember_me));
            (jar, Json(user)).into_response()
        }
        Ok(SignInResult::NotAllowed) => {
            tracing::warn!("sign-in refused for unconfirmed account");
            form_error(NOT_ALLOWED_MESSAGE)
        }
        Ok(SignInResult::Failed) => form_error(INVALID_LOGIN_MESSAGE),
        Err(e) => {
            tracing::error!(error = %e, "sign-in failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Body of a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub user: SessionUser,
    /// Link that confirms the account; present only when confirmation is
    /// required. No mail is sent, so the client shows it directly.
    #[serde(rename = "confirmationUrl", skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
}

pub(crate) fn confirmation_url(user_id: Uuid, code: &str) -> String {
    format!("{CONFIRM_EMAIL_PATH}?userId={user_id}&code={code}")
}

/// `POST /api/account/register`: create an account. Does not sign in.
pub async fn register(State(state): State<AppState>, Json(req): Json<RegisterRequest>) -> Response {
    match identity::register(
        state.identity.as_ref(),
        &state.options,
        &req.email,
        &req.password,
        &req.confirm_password,
    )
    .await
    {
        Ok(Registration { user, confirmation_code }) => {
            tracing::info!(
                user_id = %user.id,
                needs_confirmation = confirmation_code.is_some(),
                "user created a new account with password"
            );
            let confirmation_url = confirmation_code.map(|code| confirmation_url(user.id, &code));
            (StatusCode::CREATED, Json(RegisterResponse { user, confirmation_url })).into_response()
        }
        Err(IdentityError::Invalid(errors)) => unprocessable(&errors),
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmEmailQuery {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub code: String,
}

/// `GET /account/confirm-email?userId=&code=`: consume a confirmation code.
pub async fn confirm_email(State(state): State<AppState>, Query(query): Query<ConfirmEmailQuery>) -> Response {
    match identity::confirm_email(state.identity.as_ref(), query.user_id, &query.code).await {
        Ok(true) => {
            tracing::info!(user_id = %query.user_id, "email confirmed");
            Html(CONFIRMED_HTML).into_response()
        }
        Ok(false) => (StatusCode::BAD_REQUEST, Html(CONFIRM_FAILED_HTML)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "email confirmation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /api/account/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `GET /account/logout`: signed-out confirmation page.
pub async fn logout_page() -> Html<&'static str> {
    Html(SIGNED_OUT_HTML)
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutQuery {
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

/// `POST /account/logout?returnUrl=`: end the session, clear the cookie and
/// redirect. Works without a session so a stale page can still sign out.
pub async fn logout(State(state): State<AppState>, jar: CookieJar, Query(query): Query<LogoutQuery>) -> Response {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|t| !t.is_empty()) {
        if let Err(e) = identity::sign_out(state.identity.as_ref(), token).await {
            tracing::error!(error = %e, "session delete failed");
        }
    }
    tracing::info!("user logged out");

    let jar = jar.add(cleared_cookie(state.cookie_secure));
    match query.return_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) if is_local_url(url) => (jar, Redirect::to(url)).into_response(),
        Some(url) => {
            tracing::warn!(return_url = %url, "refusing non-local logout redirect");
            (jar, StatusCode::BAD_REQUEST).into_response()
        }
        None => (jar, Redirect::to(LOGOUT_PAGE)).into_response(),
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
