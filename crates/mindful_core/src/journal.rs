//! Diary entries and their attachments.

use crate::encoding::base64_bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Affect label attached to an entry.
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
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Mood {
    /// Feeling great
    Great,
    /// Feeling good
    Good,
    /// Neither up nor down
    #[default]
    Neutral,
    /// Under pressure
    Stressed,
    /// Feeling bad
    Bad,
}

/// What an attachment contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// A picture
    Image,
    /// A PDF document
    Pdf,
}

/// A file attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Unique identifier
    pub id: String,
    /// Kind of attachment
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Raw file contents
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// Original file name
    pub name: String,
}

impl Attachment {
    /// Whether this attachment can serve as a visual reference.
    pub fn is_image(&self) -> bool {
        self.kind == AttachmentKind::Image
    }
}

/// Whether an entry was written or captured from a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Free-form diary text
    #[default]
    Text,
    /// Saved companion conversation
    Conversation,
}

/// A user-authored diary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier
    pub id: String,
    /// When the entry was written
    pub date: DateTime<Utc>,
    /// Entry text
    pub content: String,
    /// Mood at the time of writing
    pub mood: Mood,
    /// Reflection produced by the model, if requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reflection: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attached files
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Entry origin
    #[serde(default, rename = "type")]
    pub kind: EntryKind,
}

impl JournalEntry {
    /// A text entry written now.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        mood: Mood,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            id: id.into(),
            date: Utc::now(),
            content: content.into(),
            mood,
            ai_reflection: None,
            tags: Vec::new(),
            attachments,
            kind: EntryKind::Text,
        }
    }

    /// Image attachments in attachment order.
    pub fn image_attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.is_image())
    }
}
