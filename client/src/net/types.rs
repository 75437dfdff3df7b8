//! Wire DTOs for the account API.
//!
//! DESIGN
//! ======
//! These mirror the server's request/response bodies. A rejected form comes
//! back as `{"errors": {"Field": ["message", ...]}}` so it can be handed to
//! `ServerSideValidator::display_errors` unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

/// The signed-in account as returned by `/api/account/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    pub email: String,
    pub email_confirmed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of a successful registration. `confirmation_url` is present when
/// the account must be confirmed before it can sign in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
    #[serde(default)]
    pub confirmation_url: Option<String>,
}

/// Body of a 422 response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationProblem {
    #[serde(default)]
    pub errors: FieldErrors,
}

/// Why a form post did not succeed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// The server rejected specific fields.
    #[error("form rejected")]
    Rejected(FieldErrors),
    #[error("{0}")]
    Transport(String),
}
