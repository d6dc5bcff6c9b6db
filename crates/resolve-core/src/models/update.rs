//! Update payloads for resolutions

use serde::{Deserialize, Serialize};

use crate::models::resolution::{Priority, Resolution};

/// Payload carrying every mutable field except tags
///
/// Used by `create` (tags start empty) and by the full-payload update path
/// (tags are left untouched).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPayload {
    pub name: String,
    pub description: String,
    pub deadline: String,
    pub completed: bool,
    pub category: String,
    pub progress: u64,
    pub priority: Priority,
}

/// A single-field update, closed over the allowed field names
///
/// The id, tag sequence, and both timestamps are excluded by construction:
/// there is no variant for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum FieldUpdate {
    Name(String),
    Description(String),
    Deadline(String),
    Completed(bool),
    Category(String),
    Progress(u64),
    Priority(Priority),
}

impl FieldUpdate {
    /// Name of the field this update targets
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Description(_) => "description",
            Self::Deadline(_) => "deadline",
            Self::Completed(_) => "completed",
            Self::Category(_) => "category",
            Self::Progress(_) => "progress",
            Self::Priority(_) => "priority",
        }
    }

    /// Apply this update to a record, replacing exactly one field
    pub fn apply(self, record: &mut Resolution) {
        match self {
            Self::Name(value) => record.name = value,
            Self::Description(value) => record.description = value,
            Self::Deadline(value) => record.deadline = value,
            Self::Completed(value) => record.completed = value,
            Self::Category(value) => record.category = value,
            Self::Progress(value) => record.progress = value,
            Self::Priority(value) => record.priority = value,
        }
    }
}
