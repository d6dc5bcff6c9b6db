//! Resolution model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::models::update::ResolutionPayload;

/// A unique identifier for a resolution, using UUID v4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolutionId(Uuid);

impl ResolutionId {
    /// Create a new unique resolution ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ResolutionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResolutionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Priority level of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Get the lowercase string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("low") {
            Ok(Self::Low)
        } else if s.eq_ignore_ascii_case("medium") {
            Ok(Self::Medium)
        } else if s.eq_ignore_ascii_case("high") {
            Ok(Self::High)
        } else {
            Err(Error::InvalidInput(format!("Unknown priority: {s}")))
        }
    }
}

/// A resolution in the system
///
/// The record is plain data: the store layer never interprets `deadline`
/// (stored verbatim) and never bounds `progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Unique identifier, immutable once created
    pub id: ResolutionId,
    /// Short name of the goal
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Caller-supplied deadline, stored verbatim
    pub deadline: String,
    /// Whether the resolution has been completed
    pub completed: bool,
    /// Category, used for exact-match filtering
    pub category: String,
    /// Progress counter, unclamped
    pub progress: u64,
    /// Free-form tags; order preserved, not deduplicated
    pub tags: Vec<String>,
    /// Priority level
    pub priority: Priority,
    /// Creation timestamp (UTC nanoseconds), set once
    pub created_at: i64,
    /// Last full-payload update timestamp (UTC nanoseconds)
    pub updated_at: Option<i64>,
}

impl Resolution {
    /// Assemble a fresh record from a payload
    ///
    /// Tags start empty and `updated_at` is absent until the first
    /// full-payload update.
    #[must_use]
    pub fn new(id: ResolutionId, payload: ResolutionPayload, created_at: i64) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            deadline: payload.deadline,
            completed: payload.completed,
            category: payload.category,
            progress: payload.progress,
            tags: Vec::new(),
            priority: payload.priority,
            created_at,
            updated_at: None,
        }
    }

    /// Replace every payload field with the given payload's values
    ///
    /// Leaves `id`, `tags`, and both timestamps untouched.
    pub fn apply_payload(&mut self, payload: ResolutionPayload) {
        self.name = payload.name;
        self.description = payload.description;
        self.deadline = payload.deadline;
        self.completed = payload.completed;
        self.category = payload.category;
        self.progress = payload.progress;
        self.priority = payload.priority;
    }

    /// Check whether the record matches a search query
    ///
    /// A record matches if `query` is a substring of `name` or `description`,
    /// or equals one tag exactly. Case-sensitive.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.contains(query)
            || self.description.contains(query)
            || self.tags.iter().any(|tag| tag == query)
    }
}
