//! Task domain model.
//!
//! This module contains the core Task entity and the value objects used to
//! create and patch tasks through the repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{Result, TaskdeckError};

/// Maximum accepted title length, matching the backend column.
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum accepted description length, matching the backend column.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Priority tag attached to a task.
///
/// Serialized in kebab-case so `UrgentImportant` travels as
/// `"urgent-important"`, the form the backend stores.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
    Important,
    UrgentImportant,
    Critical,
}

/// A user-owned to-do item.
///
/// Tasks are owned by the backend; the client holds a read-mostly snapshot
/// per list fetch and never mutates a task in place. Every mutation goes
/// through the repository and is followed by a full re-fetch, so the local
/// copy is always a snapshot with an accepted staleness window of one
/// round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (UUID format, assigned by the backend)
    pub id: String,
    /// Non-empty task title
    pub title: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Priority tag; rows predating the priority column default to `Normal`
    #[serde(default)]
    pub priority: TaskPriority,
    /// Timestamp when the task was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the task was last updated
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new task.
///
/// Construct through [`TaskDraft::new`], which validates the title so the
/// repository never dispatches a request the backend will reject for shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: TaskPriority,
}

impl TaskDraft {
    /// Creates a validated draft.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for an empty (or whitespace-only) title
    /// or for title/description exceeding the backend column limits.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        priority: TaskPriority,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskdeckError::validation("Title cannot be empty"));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(TaskdeckError::validation(format!(
                "Title cannot exceed {} characters",
                MAX_TITLE_LEN
            )));
        }
        if let Some(description) = &description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err(TaskdeckError::validation(format!(
                    "Description cannot exceed {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }

        Ok(Self {
            title,
            description,
            completed: false,
            priority,
        })
    }
}

/// Partial update for an existing task.
///
/// Unset fields are skipped during serialization so the backend only
/// touches what the caller changed (exclude-unset semantics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// Validates the fields that are set.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if a set title is empty or a set field
    /// exceeds its backend column limit.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TaskdeckError::validation("Title cannot be empty"));
            }
            if title.len() > MAX_TITLE_LEN {
                return Err(TaskdeckError::validation(format!(
                    "Title cannot exceed {} characters",
                    MAX_TITLE_LEN
                )));
            }
        }
        if let Some(description) = &self.description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err(TaskdeckError::validation(format!(
                    "Description cannot exceed {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }
        Ok(())
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_rejects_empty_title() {
        let draft = TaskDraft::new("   ", None, TaskPriority::Normal);
        assert!(draft.is_err());
        assert!(draft.unwrap_err().is_validation());
    }

    #[test]
    fn test_draft_accepts_valid_title() {
        let draft = TaskDraft::new("Buy groceries", None, TaskPriority::High).unwrap();
        assert_eq!(draft.title, "Buy groceries");
        assert!(!draft.completed);
    }

    #[test]
    fn test_priority_wire_format() {
        let json = serde_json::to_string(&TaskPriority::UrgentImportant).unwrap();
        assert_eq!(json, "\"urgent-important\"");
        let parsed: TaskPriority = serde_json::from_str("\"urgent-important\"").unwrap();
        assert_eq!(parsed, TaskPriority::UrgentImportant);
    }

    #[test]
    fn test_missing_priority_defaults_to_normal() {
        let json = r#"{
            "id": "t-1",
            "title": "Old row",
            "completed": false,
            "created_at": "2026-01-15T10:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, TaskPriority::Normal);
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }

    #[test]
    fn test_patch_validates_set_title() {
        let patch = TaskPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().is_validation());
    }
}
