//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render form chrome while reading shared state from Leptos
//! context providers.

pub mod validation;
