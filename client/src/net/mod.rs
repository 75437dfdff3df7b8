//! Networking modules for the account API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the shared wire schema,
//! including the `FieldErrors` payload of a rejected form.

pub mod api;
pub mod types;
