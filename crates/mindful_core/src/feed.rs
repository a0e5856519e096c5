//! Feed generation configuration, pipeline values and persisted posts.

use crate::encoding::base64_bytes;
use crate::{Attachment, JournalEntry, Mood};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Target media format of a generation run.
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
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum OutputFormat {
    /// A single still image
    #[default]
    Image,
    /// A short animated clip
    Video,
}

/// User-level preferences for feed generation.
///
/// Persisted independently of any post and changed only through explicit
/// settings actions.
///
/// # Examples
///
/// ```
/// use mindful_core::{GenerationConfig, OutputFormat};
///
/// let config = GenerationConfig::default();
/// assert_eq!(config.art_style, "Abstract & Dreamy");
/// assert!(config.include_audio);
/// assert_eq!(config.output_format, OutputFormat::Image);
///
/// let video = config.with_output_format(OutputFormat::Video).with_include_audio(false);
/// assert_eq!(video.output_format, OutputFormat::Video);
/// assert!(!video.include_audio);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_", into)]
pub struct GenerationConfig {
    /// Free-text visual style
    pub art_style: String,
    /// Free-text caption tone
    pub caption_tone: String,
    /// Whether to synthesise narration
    pub include_audio: bool,
    /// Image or video
    pub output_format: OutputFormat,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            art_style: "Abstract & Dreamy".to_string(),
            caption_tone: "Reflective & Poetic".to_string(),
            include_audio: true,
            output_format: OutputFormat::Image,
        }
    }
}

/// Inputs to one pipeline run. Immutable for the duration of the run.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GenerationRequest {
    /// Entry the post will point back to
    entry_id: String,
    /// Entry text
    text: String,
    /// Entry mood
    mood: Mood,
    /// Entry attachments (images and documents)
    attachments: Vec<Attachment>,
    /// Generation preferences
    config: GenerationConfig,
}

impl GenerationRequest {
    /// Create a request from its parts.
    pub fn new(
        entry_id: impl Into<String>,
        text: impl Into<String>,
        mood: Mood,
        attachments: Vec<Attachment>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            text: text.into(),
            mood,
            attachments,
            config,
        }
    }

    /// Create a request for a stored entry.
    pub fn from_entry(entry: &JournalEntry, config: GenerationConfig) -> Self {
        Self::new(
            entry.id.clone(),
            entry.content.clone(),
            entry.mood,
            entry.attachments.clone(),
            config,
        )
    }

    /// Image attachments in attachment order.
    pub fn image_attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.is_image())
    }
}

/// Caption and visual prompt derived from an entry. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualBrief {
    /// Prompt for the image or video model
    pub visual_prompt: String,
    /// Short social-style caption
    pub caption: String,
}

/// Encoded binary payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    /// MIME type, e.g. "image/png" or "video/mp4"
    pub mime_type: String,
    /// Encoded bytes
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl MediaPayload {
    /// Create a payload.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// The visual artifact of a run: an image or a video, never both.
///
/// # Examples
///
/// ```
/// use mindful_core::{MediaPayload, MediaResult};
///
/// let media = MediaResult::Video(MediaPayload::new("video/mp4", vec![1, 2, 3]));
/// assert!(media.image_data().is_none());
/// assert_eq!(media.video_data(), Some(&[1u8, 2, 3][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaResult {
    /// Still image
    Image(MediaPayload),
    /// Animated clip
    Video(MediaPayload),
}

impl MediaResult {
    /// Image bytes, if this is an image.
    pub fn image_data(&self) -> Option<&[u8]> {
        match self {
            MediaResult::Image(payload) => Some(&payload.data),
            MediaResult::Video(_) => None,
        }
    }

    /// Video bytes, if this is a video.
    pub fn video_data(&self) -> Option<&[u8]> {
        match self {
            MediaResult::Video(payload) => Some(&payload.data),
            MediaResult::Image(_) => None,
        }
    }

    /// The payload regardless of kind.
    pub fn payload(&self) -> &MediaPayload {
        match self {
            MediaResult::Image(payload) | MediaResult::Video(payload) => payload,
        }
    }

    /// Format this media was generated as.
    pub fn format(&self) -> OutputFormat {
        match self {
            MediaResult::Image(_) => OutputFormat::Image,
            MediaResult::Video(_) => OutputFormat::Video,
        }
    }
}

/// Synthesised narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    /// MIME type as reported by the service
    pub mime_type: String,
    /// Encoded audio bytes
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// A generated multimedia post derived from one entry.
///
/// Fields are read-only; the only mutation is [`FeedPost::toggle_like`],
/// which keeps `like_count` and `liked_by_user` in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    /// Unique identifier
    id: String,
    /// Entry this post was generated from
    source_entry_id: String,
    /// Image or video
    media: MediaResult,
    /// Caption text
    caption: String,
    /// Number of likes
    like_count: u32,
    /// Whether the user liked the post
    liked_by_user: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Mood of the source entry
    mood_tag: Mood,
    /// Optional narration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    narration_audio: Option<AudioClip>,
}

impl FeedPost {
    /// Create a post with no likes.
    pub fn new(
        id: impl Into<String>,
        source_entry_id: impl Into<String>,
        media: MediaResult,
        caption: impl Into<String>,
        created_at: DateTime<Utc>,
        mood_tag: Mood,
        narration_audio: Option<AudioClip>,
    ) -> Self {
        Self {
            id: id.into(),
            source_entry_id: source_entry_id.into(),
            media,
            caption: caption.into(),
            like_count: 0,
            liked_by_user: false,
            created_at,
            mood_tag,
            narration_audio,
        }
    }

    /// Flip the like state and adjust the count by one.
    pub fn toggle_like(&mut self) {
        if self.liked_by_user {
            self.liked_by_user = false;
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.liked_by_user = true;
            self.like_count += 1;
        }
    }
}

/// Toggle the like on the post with `id`.
///
/// Returns `false` and leaves `posts` untouched when no post matches.
pub fn toggle_like(posts: &mut [FeedPost], id: &str) -> bool {
    match posts.iter_mut().find(|post| post.id == id) {
        Some(post) => {
            post.toggle_like();
            true
        }
        None => false,
    }
}
