//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so components can depend on small focused
//! models. Form validation state lives with each form in `validation`.

pub mod auth;
