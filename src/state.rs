//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the identity store behind a trait object plus the account rules
//! and cookie settings read from configuration at startup.

use std::sync::Arc;

use crate::config::IdentityOptions;
use crate::services::store::IdentityStore;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityStore>,
    pub options: IdentityOptions,
    /// Mark session cookies `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityStore>, options: IdentityOptions, cookie_secure: bool) -> Self {
        Self { identity, options, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
