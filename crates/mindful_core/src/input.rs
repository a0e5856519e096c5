//! Input types for model requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input parts.
///
/// # Examples
///
/// ```
/// use mindful_core::{Input, MediaSource};
///
/// let text = Input::Text("Hello, world!".to_string());
///
/// let image = Input::Image {
///     mime: "image/png".to_string(),
///     source: MediaSource::Binary(vec![0x89, 0x50]),
/// };
/// assert!(image.is_media());
/// assert!(!text.is_media());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, ...).
    Image {
        /// MIME type, e.g., "image/png"
        mime: String,
        /// Media source
        source: MediaSource,
    },

    /// Document input (PDF, plain text, ...).
    Document {
        /// MIME type, e.g., "application/pdf"
        mime: String,
        /// Media source
        source: MediaSource,
        /// Optional filename for context
        filename: Option<String>,
    },
}

impl Input {
    /// Whether this part carries binary media rather than text.
    pub fn is_media(&self) -> bool {
        !matches!(self, Input::Text(_))
    }
}
