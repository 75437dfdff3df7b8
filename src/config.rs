//! Hosting configuration read from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` through `dotenvy`, then builds a `HostingConfig` once.
//! Parsing goes through a lookup function so tests can feed values without
//! touching process-wide environment variables.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SITE_ROOT: &str = "client/public";
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Account rules applied by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityOptions {
    /// Refuse sign-in until the account's email has been confirmed.
    pub require_confirmed_account: bool,
    pub min_password_length: usize,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self { require_confirmed_account: true, min_password_length: DEFAULT_MIN_PASSWORD_LENGTH }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingConfig {
    /// Postgres connection string; `None` runs on the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub site_root: PathBuf,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
    pub identity: IdentityOptions,
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_flag(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid { key, value }),
    }
}

impl HostingConfig {
    /// Build from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let identity = IdentityOptions {
            require_confirmed_account: parse_flag(
                "REQUIRE_CONFIRMED_ACCOUNT",
                get("REQUIRE_CONFIRMED_ACCOUNT"),
                true,
            )?,
            min_password_length: parse(
                "MIN_PASSWORD_LENGTH",
                get("MIN_PASSWORD_LENGTH"),
                DEFAULT_MIN_PASSWORD_LENGTH,
            )?,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            db_max_connections: parse(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                DEFAULT_DB_MAX_CONNECTIONS,
            )?,
            port: parse("PORT", get("PORT"), DEFAULT_PORT)?,
            site_root: get("SITE_ROOT").map_or_else(|| PathBuf::from(DEFAULT_SITE_ROOT), PathBuf::from),
            cookie_secure: parse_flag("COOKIE_SECURE", get("COOKIE_SECURE"), false)?,
            identity,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
