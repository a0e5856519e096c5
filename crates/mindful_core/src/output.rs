//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// Supported output parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Generated image output.
    Image {
        /// MIME type of the image
        mime: String,
        /// Binary image data
        data: Vec<u8>,
    },

    /// Generated audio output (text-to-speech).
    Audio {
        /// MIME type of the audio
        mime: String,
        /// Binary audio data
        data: Vec<u8>,
    },

    /// Structured JSON output.
    Json(serde_json::Value),
}
