//! Task entity, request payloads, and validation rules.
//!
//! Validation runs before any store call: route handlers convert the raw
//! request body into a [`TaskFields`] (create/replace) or a trimmed
//! [`TaskPatch`] (partial update), then hand it to the [`store::TaskStore`].

pub mod memory;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Minimum `titulo` length after trimming.
pub const TITLE_MIN_LEN: usize = 2;

// ─── Entity ───────────────────────────────────────────────────────────────────

/// One to-do item as stored and as serialized on the wire.
///
/// Wire keys keep the original API contract: Portuguese domain fields plus
/// camelCase timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "concluida")]
    pub completed: bool,
    #[serde(rename = "prazo")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// ─── Request payloads ─────────────────────────────────────────────────────────

/// Candidate fields for create and replace requests.
///
/// Everything is optional at the deserialization layer; `validate` enforces
/// the required/default rules and produces the full mutable field set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskDraft {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "concluida")]
    pub completed: Option<bool>,
    #[serde(rename = "prazo")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Apply trimming, defaults, and the title-length rule.
    pub fn validate(self) -> Result<TaskFields, TaskError> {
        let title = validate_title(self.title)?;
        Ok(TaskFields {
            title,
            description: self.description.map(|d| d.trim().to_string()).unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
            due_date: self.due_date,
        })
    }
}

/// The validated mutable field set of a task. A replace writes every one of
/// these, which is what makes PUT a full overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
}

/// Subset of fields supplied by a PATCH request. Absent fields keep their
/// stored values. `prazo` needs a second `Option` layer: an absent field
/// (`None`) keeps the stored due date, an explicit `"prazo": null`
/// (`Some(None)`) clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "concluida")]
    pub completed: Option<bool>,
    #[serde(rename = "prazo", default, deserialize_with = "present_or_null")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Deserialize a field that was present in the body, keeping `null` distinct
/// from the field being absent (absence is handled by `#[serde(default)]`).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer).map(Some)
}

impl TaskPatch {
    /// Trim the supplied text fields and revalidate the title if present.
    ///
    /// Fields left out of the patch keep their stored values, which already
    /// satisfy the constraints, so only supplied fields need checking.
    pub fn validate(self) -> Result<Self, TaskError> {
        let title = self.title.map(|t| validate_title(Some(t))).transpose()?;
        Ok(Self {
            title,
            description: self.description.map(|d| d.trim().to_string()),
            completed: self.completed,
            due_date: self.due_date,
        })
    }

    /// Merge this patch into an existing field set.
    pub fn apply(self, fields: &mut TaskFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        if let Some(completed) = self.completed {
            fields.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            fields.due_date = due_date;
        }
    }
}

fn validate_title(raw: Option<String>) -> Result<String, TaskError> {
    let Some(raw) = raw else {
        return Err(TaskError::Validation("'titulo' is required".to_string()));
    };
    let title = raw.trim();
    if title.chars().count() < TITLE_MIN_LEN {
        return Err(TaskError::Validation(format!(
            "'titulo' must be at least {TITLE_MIN_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Per-request task errors. Each maps to one HTTP status in the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Missing or out-of-constraint field (400).
    #[error("{0}")]
    Validation(String),
    /// Identifier does not match the store's id format (400).
    #[error("invalid task id")]
    InvalidId,
    /// Well-formed identifier with no matching record (404).
    #[error("task not found")]
    NotFound,
    /// Unexpected persistence-layer failure (500).
    #[error("task store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn draft_trims_and_defaults() {
        let draft = TaskDraft {
            title: Some("  Buy milk  ".to_string()),
            description: Some("  2 liters ".to_string()),
            completed: None,
            due_date: None,
        };
        let fields = draft.validate().unwrap();
        assert_eq!(fields.title, "Buy milk");
        assert_eq!(fields.description, "2 liters");
        assert!(!fields.completed);
        assert!(fields.due_date.is_none());
    }

    #[test]
    fn draft_without_title_is_rejected() {
        let err = TaskDraft::default().validate().unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert!(err.to_string().contains("titulo"));
    }

    #[test]
    fn draft_title_too_short_after_trim_is_rejected() {
        let draft = TaskDraft {
            title: Some("  a  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(draft.validate(), Err(TaskError::Validation(_))));
    }

    #[test]
    fn patch_validates_only_supplied_fields() {
        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        // No title supplied: nothing to reject.
        let patch = patch.validate().unwrap();
        assert_eq!(patch.completed, Some(true));

        let bad = TaskPatch {
            title: Some(" x ".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(TaskError::Validation(_))));
    }

    #[test]
    fn patch_apply_merges_supplied_fields_only() {
        let due = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let mut fields = TaskFields {
            title: "Buy milk".to_string(),
            description: "2 liters".to_string(),
            completed: false,
            due_date: None,
        };
        let patch = TaskPatch {
            completed: Some(true),
            due_date: Some(Some(due)),
            ..Default::default()
        };
        patch.apply(&mut fields);
        assert_eq!(fields.title, "Buy milk");
        assert_eq!(fields.description, "2 liters");
        assert!(fields.completed);
        assert_eq!(fields.due_date, Some(due));
    }

    #[test]
    fn patch_distinguishes_null_due_date_from_absent() {
        let absent: TaskPatch = serde_json::from_str(r#"{ "concluida": true }"#).unwrap();
        assert_eq!(absent.due_date, None);

        let null: TaskPatch = serde_json::from_str(r#"{ "prazo": null }"#).unwrap();
        assert_eq!(null.due_date, Some(None));

        let set: TaskPatch = serde_json::from_str(r#"{ "prazo": "2026-01-15T12:00:00Z" }"#).unwrap();
        let due = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(set.due_date, Some(Some(due)));
    }

    #[test]
    fn patch_apply_clears_due_date_on_explicit_null() {
        let due = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let mut fields = TaskFields {
            title: "Buy milk".to_string(),
            description: String::new(),
            completed: false,
            due_date: Some(due),
        };

        // Absent field keeps the stored due date.
        TaskPatch::default().apply(&mut fields);
        assert_eq!(fields.due_date, Some(due));

        // Explicit null clears it.
        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        patch.apply(&mut fields);
        assert_eq!(fields.due_date, None);
    }
}
