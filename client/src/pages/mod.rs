//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it creates the form's
//! `EditContext`, attaches a `ServerSideValidator`, and delegates rendering
//! of messages to `components::validation`.

pub mod home;
pub mod login;
pub mod register;
