//! Conversation roles.

use serde::{Deserialize, Serialize};

/// Who authored a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human user
    User,
    /// The model
    Model,
}
