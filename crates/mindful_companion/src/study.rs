//! Study plan generation.

use crate::attachment_part;
use mindful_core::{Attachment, GenerateRequest, Input, Message, Role, Task, TaskPriority};
use mindful_error::{JsonError, MindfulResult};
use mindful_interface::JsonMode;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

const SYSTEM_INSTRUCTION: &str = "You are a master study planner. Break down goals into \
    actionable, bite-sized tasks. If a document is provided, base the tasks specifically on \
    its content.";

/// Response schema for a generated task list.
pub fn study_plan_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "priority": {"type": "STRING", "enum": ["HIGH", "MEDIUM", "LOW"]},
                        "subject": {"type": "STRING"}
                    },
                    "required": ["title", "priority", "subject"]
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct PlannedTask {
    title: String,
    priority: TaskPriority,
    subject: String,
}

#[derive(Debug, Deserialize)]
struct StudyPlan {
    #[serde(default)]
    tasks: Vec<PlannedTask>,
}

/// Breaks a study goal into tasks.
#[derive(Debug)]
pub struct StudyPlanner<D: ?Sized> {
    driver: Arc<D>,
}

impl<D> StudyPlanner<D>
where
    D: JsonMode + ?Sized,
{
    /// Create a planner over a structured-output provider.
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Generate open tasks for `goal` within `time_available`.
    ///
    /// When a document is given it is sent ahead of the instructions and the
    /// tasks are based on its content.
    #[instrument(skip(self, document), fields(with_document = document.is_some()))]
    pub async fn generate_study_plan(
        &self,
        goal: &str,
        time_available: &str,
        document: Option<&Attachment>,
    ) -> MindfulResult<Vec<Task>> {
        let mut prompt = format!(
            "Create a concrete list of study tasks for the following goal: \"{}\". \
             Time available: {}.",
            goal, time_available
        );

        let mut parts: Vec<Input> = Vec::new();
        if let Some(document) = document {
            parts.push(attachment_part(document));
            prompt.push_str(" Use the attached document as the primary source material for the study tasks.");
        }
        parts.push(Input::Text(prompt));

        let request = GenerateRequest::conversation(
            vec![Message::new(Role::User, parts)],
            Some(SYSTEM_INSTRUCTION.to_string()),
        );
        let value = self
            .driver
            .generate_json(&request, &study_plan_schema())
            .await?;
        let plan: StudyPlan = serde_json::from_value(value)
            .map_err(|e| JsonError::new(format!("Study plan did not match schema: {}", e)))?;

        let batch = uuid::Uuid::new_v4().simple().to_string();
        let tasks: Vec<Task> = plan
            .tasks
            .into_iter()
            .enumerate()
            .map(|(idx, planned)| Task {
                id: format!("generated-{}-{}", batch, idx),
                title: planned.title,
                completed: false,
                due_date: None,
                priority: planned.priority,
                subject: Some(planned.subject),
            })
            .collect();

        info!(count = tasks.len(), "Study plan generated");
        Ok(tasks)
    }
}
