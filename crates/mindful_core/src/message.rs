//! Conversation messages.

use crate::{Input, Role};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// One turn of a conversation.
///
/// # Examples
///
/// ```
/// use mindful_core::{Input, Message, Role};
///
/// let message = Message::text(Role::User, "Hello");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, vec![Input::Text("Hello".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct Message {
    /// Author of the turn
    pub role: Role,
    /// Parts of the turn
    pub content: Vec<Input>,
}

impl Message {
    /// Create a message from parts.
    pub fn new(role: Role, content: Vec<Input>) -> Self {
        Self { role, content }
    }

    /// Create a single-part text message.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, vec![Input::Text(text.into())])
    }
}
