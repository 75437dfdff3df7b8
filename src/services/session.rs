//! Session tokens and the session user view.
//!
//! ARCHITECTURE
//! ============
//! A session is an opaque random token stored server side and sent to the
//! browser as an HttpOnly cookie. Email confirmation codes come from the
//! same random-hex generator.

use std::fmt::Write;

use rand::Rng;
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    pub email: String,
    pub email_confirmed: bool,
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
