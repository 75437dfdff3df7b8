#[cfg(test)]
#[path = "outcome_test.rs"]
mod outcome_test;

use super::InteropError;

/// Result of a best-effort browser call.
///
/// Both arms carry a value, so callers that only want the neutral-default
/// behavior can call [`Outcome::into_value`] and move on.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The browser function ran and its result decoded.
    Completed(T),
    /// The call failed; `value` is the neutral default for the operation.
    Defaulted { value: T, error: InteropError },
}

impl<T> Outcome<T> {
    pub(crate) fn defaulted(error: InteropError) -> Self
    where
        T: Default,
    {
        Self::Defaulted { value: T::default(), error }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Completed(value) | Self::Defaulted { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Completed(value) | Self::Defaulted { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    #[must_use]
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }

    /// The swallowed failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&InteropError> {
        match self {
            Self::Completed(_) => None,
            Self::Defaulted { error, .. } => Some(error),
        }
    }
}
