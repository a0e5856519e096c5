//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, GeminiError, GenerationError, HttpError, JsonError, StorageError,
};

/// Every error condition a Mindful crate can surface.
///
/// # Examples
///
/// ```
/// use mindful_error::{MindfulError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: MindfulError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MindfulErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Durable store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Feed generation pipeline error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Mindful error with kind discrimination.
///
/// # Examples
///
/// ```
/// use mindful_error::{MindfulResult, ConfigError};
///
/// fn might_fail() -> MindfulResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Mindful Error: {}", _0)]
pub struct MindfulError(Box<MindfulErrorKind>);

impl MindfulError {
    /// Create a new error from a kind.
    pub fn new(kind: MindfulErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MindfulErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MindfulErrorKind
impl<T> From<T> for MindfulError
where
    T: Into<MindfulErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Mindful operations.
pub type MindfulResult<T> = std::result::Result<T, MindfulError>;
