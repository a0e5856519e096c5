//! Supportive reflections on diary entries.

use mindful_core::{GenerateRequest, Message, Reflection, Role};
use mindful_error::{JsonError, MindfulResult};
use mindful_interface::JsonMode;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Entries shorter than this many characters are not analysed.
pub const MIN_REFLECTION_CHARS: usize = 10;

const SYSTEM_INSTRUCTION: &str =
    "You are an empathetic, wise, and supportive AI companion for a student's diary app.";

/// Response schema for [`Reflection`].
pub fn reflection_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": {
                "type": "STRING",
                "description": "One word sentiment (e.g., Happy, Anxious, Reflective)"
            },
            "reflection": {
                "type": "STRING",
                "description": "A 2-3 sentence supportive or philosophical reflection on the entry."
            },
            "tags": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "3-5 relevant generic tags"
            }
        },
        "required": ["sentiment", "reflection", "tags"]
    })
}

/// Produces a [`Reflection`] for an entry.
#[derive(Debug)]
pub struct EntryReflector<D: ?Sized> {
    driver: Arc<D>,
}

impl<D> EntryReflector<D>
where
    D: JsonMode + ?Sized,
{
    /// Create a reflector over a structured-output provider.
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Analyse an entry.
    ///
    /// Returns `Ok(None)` without calling the provider when the entry is
    /// shorter than [`MIN_REFLECTION_CHARS`].
    ///
    /// # Errors
    ///
    /// Provider failures and responses that do not match the schema.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn analyze_entry(&self, text: &str) -> MindfulResult<Option<Reflection>> {
        if text.chars().count() < MIN_REFLECTION_CHARS {
            debug!("Entry too short to reflect on");
            return Ok(None);
        }

        let prompt = format!(
            "Analyze this journal entry. Provide a brief supportive reflection, \
             a sentiment summary, and suggested tags.\nEntry: \"{}\"",
            text
        );
        let request = GenerateRequest::conversation(
            vec![Message::text(Role::User, prompt)],
            Some(SYSTEM_INSTRUCTION.to_string()),
        );

        let value = self
            .driver
            .generate_json(&request, &reflection_schema())
            .await?;
        let reflection: Reflection = serde_json::from_value(value)
            .map_err(|e| JsonError::new(format!("Reflection did not match schema: {}", e)))?;
        debug!(sentiment = %reflection.sentiment, tags = reflection.tags.len(), "Reflection ready");
        Ok(Some(reflection))
    }
}
