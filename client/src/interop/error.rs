//! Failures that can occur while crossing into the browser.

/// Why a browser call did not produce a usable value.
///
/// The bridge never returns these directly; they ride along inside
/// [`Outcome::Defaulted`](super::Outcome::Defaulted) so callers and tests can
/// tell a real empty result from a swallowed failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteropError {
    #[error("browser boundary unavailable: {0}")]
    Unavailable(&'static str),
    #[error("browser function {0} is not defined")]
    MissingFunction(String),
    #[error("browser function {function} failed: {message}")]
    Script { function: String, message: String },
    #[error("argument serialization failed: {0}")]
    Serialize(String),
    #[error("unexpected result from {function}: {message}")]
    Decode { function: String, message: String },
}
