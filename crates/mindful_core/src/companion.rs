//! Companion chat and reflection types.

use serde::{Deserialize, Serialize};

/// Prebuilt voices available for speech synthesis.
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
#[strum(ascii_case_insensitive)]
pub enum VoiceName {
    /// Upbeat
    Puck,
    /// Informative
    Charon,
    /// Firm
    #[default]
    Kore,
    /// Excitable
    Fenrir,
    /// Bright
    Zephyr,
}

/// Persona for a friend companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendProfile {
    /// Display name
    pub name: String,
    /// Personality description
    pub personality: String,
    /// Shared memories and relationship details
    pub context: String,
    /// Voice used when speaking
    pub voice_name: VoiceName,
    /// Avatar location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The user
    User,
    /// The companion
    Model,
}

/// One message shown in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique identifier
    pub id: String,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub text: String,
    /// Whether this message reports a failure
    #[serde(default)]
    pub is_error: bool,
}

/// Model analysis of a diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    /// One-word sentiment
    pub sentiment: String,
    /// Short supportive reflection
    pub reflection: String,
    /// Suggested tags
    pub tags: Vec<String>,
}
