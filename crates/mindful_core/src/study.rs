//! Study tasks.

use serde::{Deserialize, Serialize};

/// How urgent a task is.
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
pub enum TaskPriority {
    /// Can wait
    Low,
    /// Normal
    #[default]
    Medium,
    /// Do first
    High,
}

/// A study task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// What to do
    pub title: String,
    /// Done flag
    pub completed: bool,
    /// Optional due date as entered by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Urgency
    pub priority: TaskPriority,
    /// Subject area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}
