//! Gemini-specific error types and retry logic.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// API request failed before a response was received
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Invalid Gemini response: {}", _0)]
    InvalidResponse(String),
    /// Response contained no candidates or no usable content
    #[display("Gemini returned an empty response")]
    EmptyResponse,
    /// Base64 decoding failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Long-running operation finished with an error
    #[display("Operation {} failed: {}", operation, message)]
    OperationFailed {
        /// Operation name
        operation: String,
        /// Error message reported by the service
        message: String,
    },
    /// Media source type not supported by the REST API
    #[display("URL media sources not supported for inline parts")]
    UrlMediaNotSupported,
}

impl GeminiErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiErrorKind::HttpError { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            GeminiErrorKind::ApiRequest(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            GeminiErrorKind::HttpError { status_code, .. } => match *status_code {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 5, 60),
            },
            GeminiErrorKind::ApiRequest(_) => (1000, 3, 10),
            _ => (2000, 5, 60),
        }
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use mindful_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey("GEMINI_API_KEY".into()));
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use mindful_error::{GeminiError, GeminiErrorKind, RetryableError};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable) or 429 (rate limit)
    /// return true. Permanent errors like 401 or 400 return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

impl RetryableError for GeminiError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
