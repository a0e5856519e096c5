//! Test utilities for feed pipeline tests.
//!
//! This module provides a scriptable mock driver and request helpers.

use mindful_core::{Attachment, AttachmentKind, GenerationConfig, GenerationRequest, Mood, OutputFormat};

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockFeedDriver, VideoScript};

/// An image attachment whose bytes are its id.
pub fn image_attachment(id: &str) -> Attachment {
    Attachment {
        id: id.to_string(),
        kind: AttachmentKind::Image,
        mime_type: "image/png".to_string(),
        data: id.as_bytes().to_vec(),
        name: format!("{}.png", id),
    }
}

/// A generation request for a plain entry.
pub fn request_with(
    output_format: OutputFormat,
    include_audio: bool,
    attachments: Vec<Attachment>,
) -> GenerationRequest {
    GenerationRequest::new(
        "entry-1",
        "Walked by the river at sunset and felt lighter.",
        Mood::Great,
        attachments,
        GenerationConfig {
            include_audio,
            output_format,
            ..Default::default()
        },
    )
}
