//! Form validation state and the server-error adapter.
//!
//! ARCHITECTURE
//! ============
//! `EditContext` is the per-form hub (event hooks + message aggregation),
//! `ValidationMessageStore` holds one source's messages, and
//! `ServerSideValidator` feeds server `FieldErrors` into its own store.
//! Pages provide the `EditContext` through Leptos context so nested
//! components can find it with `use_server_side_validator`.


mod edit_context;
mod field;
mod message_store;
mod server_side;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use leptos::prelude::use_context;

pub use edit_context::{EditContext, Subscription};
pub use field::{FieldIdentifier, ModelRef};
pub use message_store::ValidationMessageStore;
pub use server_side::ServerSideValidator;

/// Field name → messages, as returned by the server for a rejected form.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{component} requires an {expected} in scope; render it inside a form that provides one")]
    MissingEditContext { component: &'static str, expected: &'static str },
}

/// Attach a `ServerSideValidator` to the `EditContext` provided by the
/// enclosing form.
///
/// # Errors
///
/// Returns `ValidationError::MissingEditContext` when no ancestor provided an
/// `EditContext`.
pub fn use_server_side_validator() -> Result<ServerSideValidator, ValidationError> {
    ServerSideValidator::attach(use_context::<EditContext>().as_ref())
}

// A handler that panicked mid-update leaves plain message maps, which are
// still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
