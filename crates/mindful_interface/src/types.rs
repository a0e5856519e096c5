//! Types exchanged through the capability traits.

use derive_builder::Builder;
use derive_getters::Getters;
use mindful_core::MediaPayload;
use serde::{Deserialize, Serialize};

/// Frame shape requested from image and video models.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum AspectRatio {
    /// 1:1
    #[default]
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
    /// 16:9
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Portrait,
}

/// Which video model family a job is submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum VideoMode {
    /// Richer model anchored on reference images
    ReferenceConditioned,
    /// Faster model driven by text alone
    TextOnly,
}

/// A video generation job submission.
///
/// # Examples
///
/// ```
/// use mindful_interface::{AspectRatio, VideoMode, VideoRequest};
///
/// let request = VideoRequest::builder()
///     .prompt("A quiet lake at dawn")
///     .mode(VideoMode::TextOnly)
///     .aspect_ratio(AspectRatio::Landscape)
///     .resolution("720p")
///     .build()
///     .unwrap();
/// assert!(request.reference_images().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct VideoRequest {
    /// Scene description
    prompt: String,
    /// Model family
    mode: VideoMode,
    /// Images the clip should stay faithful to
    #[builder(default)]
    reference_images: Vec<MediaPayload>,
    /// Frame resolution, e.g. "720p"
    resolution: String,
    /// Frame shape
    aspect_ratio: AspectRatio,
}

impl VideoRequest {
    /// Creates a new builder for `VideoRequest`.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }
}

/// Handle to a submitted long-running video job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoJob {
    /// Provider-assigned operation name
    pub name: String,
}

/// Snapshot of a video job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoJobStatus {
    /// Whether the job has finished
    pub done: bool,
    /// Where the finished clip can be downloaded
    pub result_uri: Option<String>,
    /// Error reported by the provider for a finished job
    pub error: Option<String>,
}

impl VideoJobStatus {
    /// A job still in progress.
    pub fn pending() -> Self {
        Self::default()
    }

    /// A finished job with a downloadable result.
    pub fn finished(uri: impl Into<String>) -> Self {
        Self {
            done: true,
            result_uri: Some(uri.into()),
            error: None,
        }
    }
}
