//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Stored value could not be decoded
    #[display("Corrupt value for key '{}': {}", key, message)]
    Corrupt {
        /// Storage key
        key: String,
        /// Decoder message
        message: String,
    },
    /// Value could not be encoded for storage
    #[display("Failed to encode value for key '{}': {}", key, message)]
    Encode {
        /// Storage key
        key: String,
        /// Encoder message
        message: String,
    },
    /// Key contains characters that cannot map to a storage location
    #[display("Invalid storage key: {}", _0)]
    InvalidKey(String),
    /// A referenced record does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use mindful_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::InvalidKey("../etc".to_string()));
/// assert!(format!("{}", err).contains("Invalid storage key"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
