#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::fmt;

use uuid::Uuid;

/// Opaque identity of the model object a form edits.
///
/// Two models with identical field names still produce distinct
/// [`FieldIdentifier`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelRef(Uuid);

impl ModelRef {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModelRef {
    fn default() -> Self {
        Self::new()
    }
}

/// Addresses one field of one model for validation purposes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldIdentifier {
    model: ModelRef,
    field_name: String,
}

impl FieldIdentifier {
    #[must_use]
    pub fn new(model: ModelRef, field_name: impl Into<String>) -> Self {
        Self { model, field_name: field_name.into() }
    }

    #[must_use]
    pub fn model(&self) -> ModelRef {
        self.model
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl fmt::Display for FieldIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_name)
    }
}
