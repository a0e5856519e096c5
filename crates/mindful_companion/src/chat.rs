//! Multi-turn companion conversations.

use crate::attachment_part;
use mindful_core::{
    Attachment, ChatMessage, ChatRole, FriendProfile, GenerateRequest, Input, Message, Role,
};
use mindful_error::{GeminiError, GeminiErrorKind, MindfulResult};
use mindful_interface::TextGeneration;
use std::sync::Arc;
use tracing::{debug, instrument};

const TUTOR_INSTRUCTION: &str = "You are a helpful and knowledgeable study tutor. When a \
    document is provided, answer questions based strictly on that document. Be concise, \
    encouraging, and clear.";

const STUDY_PRIMING_REQUEST: &str = "I have uploaded this document. Please help me study it. \
    Answer my questions and help me understand the key concepts.";

/// Model turn that follows a primed study document.
pub const STUDY_PRIMING_REPLY: &str =
    "I've analyzed the document. I'm ready to help you study! What would you like to know?";

fn friend_instruction(friend: &FriendProfile) -> String {
    format!(
        "You are {name}.\n\
         Personality: {personality}\n\
         Context/Shared Memory: {context}\n\n\
         Act exactly like this person. Be conversational, empathetic, and stay in character.\n\
         Keep responses relatively short and natural like a text message, unless asked for deep advice.",
        name = friend.name,
        personality = friend.personality,
        context = friend.context,
    )
}

/// A conversation with a system instruction and full history.
///
/// The whole history is sent on every turn. A failed turn leaves the
/// history as it was before the call.
#[derive(Debug)]
pub struct ChatSession<D: ?Sized> {
    driver: Arc<D>,
    system_instruction: String,
    history: Vec<Message>,
    primed_turns: usize,
}

impl<D> ChatSession<D>
where
    D: TextGeneration + ?Sized,
{
    /// Start a study tutor session, optionally primed with a document.
    pub fn study(driver: Arc<D>, document: Option<&Attachment>) -> Self {
        let history = match document {
            Some(document) => vec![
                Message::new(
                    Role::User,
                    vec![
                        attachment_part(document),
                        Input::Text(STUDY_PRIMING_REQUEST.to_string()),
                    ],
                ),
                Message::text(Role::Model, STUDY_PRIMING_REPLY),
            ],
            None => Vec::new(),
        };
        let primed_turns = history.len();
        Self {
            driver,
            system_instruction: TUTOR_INSTRUCTION.to_string(),
            history,
            primed_turns,
        }
    }

    /// Start a session in the persona of `friend`.
    pub fn friend(driver: Arc<D>, friend: &FriendProfile) -> Self {
        Self {
            driver,
            system_instruction: friend_instruction(friend),
            history: Vec::new(),
            primed_turns: 0,
        }
    }

    /// Instruction applied to every turn.
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Every turn sent so far, including priming turns.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Send a user message and return the reply.
    ///
    /// # Errors
    ///
    /// Provider failures and empty replies. The history is unchanged.
    #[instrument(skip_all, fields(turns = self.history.len()))]
    pub async fn send(&mut self, text: &str) -> MindfulResult<String> {
        let mut messages = self.history.clone();
        messages.push(Message::text(Role::User, text));

        let request =
            GenerateRequest::conversation(messages, Some(self.system_instruction.clone()));
        let response = self.driver.generate(&request).await?;
        let reply = response.text();
        if reply.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse).into());
        }

        self.history.push(Message::text(Role::User, text));
        self.history.push(Message::text(Role::Model, reply.clone()));
        debug!(reply_len = reply.len(), "Chat turn complete");
        Ok(reply)
    }

    /// Text turns after any priming, for display.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.history
            .iter()
            .skip(self.primed_turns)
            .enumerate()
            .map(|(idx, message)| ChatMessage {
                id: format!("msg-{}", idx),
                role: match message.role {
                    Role::User => ChatRole::User,
                    Role::Model => ChatRole::Model,
                },
                text: message
                    .content
                    .iter()
                    .filter_map(|part| match part {
                        Input::Text(text) => Some(text.as_str()),
                        _ => None,
                    })
                    .collect(),
                is_error: false,
            })
            .collect()
    }
}
