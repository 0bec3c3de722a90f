use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
///
/// The set is closed: anything outside these three values is rejected when
/// parsing a filter or reading the backing file. Any status can be reached
/// from any other.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single tracked task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, assigned once at creation.
    pub id: u64,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Current status.
    pub status: Status,
    /// Timestamp when the task was created. Never changes.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last description or status change.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a `todo` task with both timestamps set to now.
    pub fn new(id: u64, description: String) -> Self {
        let now = Utc::now();
        Task {
            id,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at`.
    ///
    /// The clock is clamped so `updated_at` never moves backwards, even if the
    /// stored value came from a machine whose clock ran ahead.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
