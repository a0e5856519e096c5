//! Stage-tagged failures of the feed generation pipeline.

/// Pipeline stage a failure is attributed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum GenerationStage {
    /// Caption and visual prompt synthesis
    #[display("PROMPT")]
    Prompt,
    /// Image or video generation
    #[display("MEDIA")]
    Media,
    /// Spoken narration synthesis
    #[display("NARRATION")]
    Narration,
}

/// Why a stage failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The entry has no text to generate from
    #[display("entry text is empty")]
    EmptyEntry,
    /// The AI service call failed
    #[display("service call failed: {}", _0)]
    Service(String),
    /// The service answered but the expected artifact was absent
    #[display("missing output: {}", _0)]
    MissingOutput(String),
    /// The service answered with content that does not match the contract
    #[display("malformed output: {}", _0)]
    MalformedOutput(String),
    /// A long-running job exceeded its deadline
    #[display("timed out after {} seconds", elapsed_secs)]
    Timeout {
        /// Wall-clock seconds spent before giving up
        elapsed_secs: u64,
    },
    /// The run was abandoned by the caller
    #[display("cancelled")]
    Cancelled,
}

/// A stage failure with location tracking.
///
/// Prompt and media failures are fatal to a run; narration failures are not.
///
/// # Examples
///
/// ```
/// use mindful_error::{GenerationError, GenerationErrorKind, GenerationStage};
///
/// let err = GenerationError::new(GenerationStage::Media, GenerationErrorKind::Cancelled);
/// assert!(err.is_fatal());
/// assert!(err.is_cancelled());
/// assert!(format!("{}", err).contains("MEDIA"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error [{}]: {} at line {} in {}", stage, kind, line, file)]
pub struct GenerationError {
    /// Stage that failed
    pub stage: GenerationStage,
    /// Failure reason
    pub kind: GenerationErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(stage: GenerationStage, kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Wrap a service error for the given stage.
    #[track_caller]
    pub fn service(stage: GenerationStage, cause: impl std::fmt::Display) -> Self {
        Self::new(stage, GenerationErrorKind::Service(cause.to_string()))
    }

    /// Whether this failure ends the run without a post.
    pub fn is_fatal(&self) -> bool {
        self.stage != GenerationStage::Narration
    }

    /// Whether the run was abandoned rather than failed.
    pub fn is_cancelled(&self) -> bool {
        self.kind == GenerationErrorKind::Cancelled
    }
}
