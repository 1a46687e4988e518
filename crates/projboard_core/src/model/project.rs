//! Project domain record and list ordering modes.
//!
//! # Invariants
//! - `id` is `None` until the first successful save and never changes after.
//! - `priority` is conventionally 1-5 but intentionally unvalidated; the
//!   schema accepts any integer and callers own any range policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable row identifier assigned by the store on first insert.
pub type ProjectId = i64;

/// The sole persisted entity: a project with a due date and a priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// `None` for a project that has never been saved.
    pub id: Option<ProjectId>,
    /// Required, may be empty. Display fallbacks belong to the UI layer.
    pub name: String,
    /// Serialized as `dueDate` to match external schema naming.
    #[serde(rename = "dueDate")]
    pub due_date: DateTime<Utc>,
    pub priority: i64,
}

impl Project {
    /// Creates an unsaved project with no identity yet.
    pub fn new(name: impl Into<String>, due_date: DateTime<Utc>, priority: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            due_date,
            priority,
        }
    }

    /// Returns whether this project has been assigned a row identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Exclusive ordering modes for project list queries.
///
/// Name ordering is case-insensitive ascending; due-date and priority
/// orderings are descending (furthest-in-future and highest first). Ties
/// resolve by ascending id, which keeps every ordering stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectOrdering {
    ByName,
    ByDueDate,
    #[default]
    ByPriority,
}
