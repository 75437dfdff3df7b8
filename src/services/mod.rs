//! Identity services used by the account routes.
//!
//! ARCHITECTURE
//! ============
//! `store` defines the persistence seam (`IdentityStore`) with Postgres and
//! in-memory backends, `session` owns token generation, and `identity` holds
//! the sign-in/registration rules so route handlers stay focused on HTTP.

pub mod identity;
pub mod memory;
pub mod session;
pub mod store;
