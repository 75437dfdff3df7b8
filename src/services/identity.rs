//! Account rules: registration, password sign-in, sign-out.
//!
//! DESIGN
//! ======
//! Emails are normalized (trimmed, lowercased) before every lookup so the
//! store can key on them directly. Passwords are stored as Argon2id PHC
//! strings, which carry their own salt and cost parameters.
//!
//! When accounts must be confirmed, registration issues a random one-time
//! code. Only its SHA-256 digest is stored; the plain code goes back to the
//! caller, which turns it into a confirmation link.
//!
//! ERROR HANDLING
//! ==============
//! Anything a user can fix comes back as `FieldErrors` keyed by the form's
//! field names (`Email`, `Password`, `ConfirmPassword`). Store failures are
//! surfaced separately so routes can answer 500 instead of 422.

use std::collections::BTreeMap;

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::session::{SessionUser, bytes_to_hex, generate_token};
use super::store::{IdentityStore, StoreError, UserRecord};
use crate::config::IdentityOptions;

/// Field name -> messages, serialized as the client's `FieldErrors`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const EMAIL_FIELD: &str = "Email";
pub const PASSWORD_FIELD: &str = "Password";
pub const CONFIRM_PASSWORD_FIELD: &str = "ConfirmPassword";

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Already in use";

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid registration")]
    Invalid(FieldErrors),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A freshly created account. `confirmation_code` is set when the account
/// must be confirmed before it can sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub user: SessionUser,
    pub confirmation_code: Option<String>,
}

/// Result of a password sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInResult {
    Succeeded { token: String, user: SessionUser },
    /// Credentials were right but the account may not sign in yet.
    NotAllowed,
    Failed,
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a password into an Argon2id PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes)?;
    Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Check a password against a stored PHC string. Malformed hashes never
/// verify.
#[must_use]
pub fn verify_password(password: &str, phc: &str) -> bool {
    PasswordHash::new(phc).is_ok_and(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[must_use]
pub fn hash_confirmation_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.trim().as_bytes());
    bytes_to_hex(&hasher.finalize())
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_owned()).or_default().push(message.into());
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Check a registration form. Returns an empty map when it is acceptable.
#[must_use]
pub fn validate_registration(
    options: &IdentityOptions,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let email = email.trim();

    if email.is_empty() {
        push(&mut errors, EMAIL_FIELD, "The Email field is required.");
    } else if !looks_like_email(email) {
        push(&mut errors, EMAIL_FIELD, "The Email field is not a valid e-mail address.");
    }

    if password.is_empty() {
        push(&mut errors, PASSWORD_FIELD, "The Password field is required.");
    } else if password.chars().count() < options.min_password_length {
        push(
            &mut errors,
            PASSWORD_FIELD,
            format!("The Password must be at least {} characters long.", options.min_password_length),
        );
    }

    if password != confirm_password {
        push(
            &mut errors,
            CONFIRM_PASSWORD_FIELD,
            "The password and confirmation password do not match.",
        );
    }

    errors
}

/// Create an account. When the options require confirmation the account
/// starts unconfirmed and a confirmation code is issued for it.
///
/// # Errors
///
/// `IdentityError::Invalid` with field errors (including a taken email),
/// `IdentityError::Hash` if hashing fails, or `IdentityError::Store` if the
/// store fails.
pub async fn register(
    store: &dyn IdentityStore,
    options: &IdentityOptions,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Registration, IdentityError> {
    let errors = validate_registration(options, email, password, confirm_password);
    if !errors.is_empty() {
        return Err(IdentityError::Invalid(errors));
    }

    let password_hash = hash_password(password).map_err(|e| IdentityError::Hash(e.to_string()))?;
    let user = UserRecord {
        id: Uuid::new_v4(),
        email: normalize_email(email),
        password_hash,
        email_confirmed: !options.require_confirmed_account,
    };

    match store.insert_user(&user).await {
        Ok(()) => {}
        Err(StoreError::DuplicateEmail) => {
            let mut errors = FieldErrors::new();
            push(&mut errors, EMAIL_FIELD, DUPLICATE_EMAIL_MESSAGE);
            return Err(IdentityError::Invalid(errors));
        }
        Err(e) => return Err(e.into()),
    }

    let confirmation_code = if user.email_confirmed {
        None
    } else {
        let code = generate_token();
        store.create_email_confirmation(user.id, &hash_confirmation_code(&code)).await?;
        Some(code)
    };

    Ok(Registration { user: user.session_user(), confirmation_code })
}

/// Confirm an account with the code issued at registration. Returns `false`
/// for an unknown user, a wrong code, or a code already used.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn confirm_email(store: &dyn IdentityStore, user_id: Uuid, code: &str) -> Result<bool, StoreError> {
    store.confirm_email(user_id, &hash_confirmation_code(code)).await
}

/// Check credentials and open a session on success.
///
/// # Errors
///
/// Returns an error only if the store fails.
pub async fn password_sign_in(
    store: &dyn IdentityStore,
    options: &IdentityOptions,
    email: &str,
    password: &str,
) -> Result<SignInResult, StoreError> {
    let Some(user) = store.find_user_by_email(&normalize_email(email)).await? else {
        return Ok(SignInResult::Failed);
    };
    if !verify_password(password, &user.password_hash) {
        return Ok(SignInResult::Failed);
    }
    if options.require_confirmed_account && !user.email_confirmed {
        return Ok(SignInResult::NotAllowed);
    }

    let token = store.create_session(user.id).await?;
    Ok(SignInResult::Succeeded { token, user: user.session_user() })
}

/// End a session. Unknown tokens are ignored.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn sign_out(store: &dyn IdentityStore, token: &str) -> Result<(), StoreError> {
    store.delete_session(token).await
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
