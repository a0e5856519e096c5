//! Request and response types for model generation.

use crate::{Message, Output};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Server-side tools a request may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Ground answers with Google Maps places
    GoogleMaps,
    /// Ground answers with Google Search results
    GoogleSearch,
}

/// Generic generation request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use mindful_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::text(Role::User, "Hello!")])
///     .system_instruction(Some("Be brief.".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert!(request.tools().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// System instruction applied to the whole conversation
    #[builder(default)]
    system_instruction: Option<String>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier overriding the client default
    #[builder(default)]
    model: Option<String>,
    /// Server-side tools to enable
    #[builder(default)]
    tools: Vec<Tool>,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Single user turn with no other options.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::text(crate::Role::User, text)],
            ..Default::default()
        }
    }

    /// Multi-turn conversation under an optional system instruction.
    pub fn conversation(messages: Vec<Message>, system_instruction: Option<String>) -> Self {
        Self {
            messages,
            system_instruction,
            ..Default::default()
        }
    }

    /// Enable server-side tools on this request.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }
}

/// A web or maps source the model grounded its answer on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundingSource {
    /// Display title
    pub title: Option<String>,
    /// Source location
    pub uri: Option<String>,
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use mindful_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Hello".into()), Output::Text(" there".into())],
///     grounding: vec![],
/// };
/// assert_eq!(response.text(), "Hello there");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
    /// Grounding sources attached to the answer
    #[serde(default)]
    pub grounding: Vec<GroundingSource>,
}

impl GenerateResponse {
    /// Concatenation of every text output.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
