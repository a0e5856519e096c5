//! Error types for the Mindful library.
//!
//! This crate provides the foundation error types used throughout the Mindful workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use mindful_error::{MindfulResult, HttpError};
//!
//! fn fetch_data() -> MindfulResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod gemini;
mod generation;
mod http;
mod json;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{MindfulError, MindfulErrorKind, MindfulResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use generation::{GenerationError, GenerationErrorKind, GenerationStage};
pub use http::HttpError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
