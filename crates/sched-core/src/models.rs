use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled task as it travels over the wire.
///
/// Every field is text. `id` is empty until the task has been stored,
/// `date` is `YYYYMMDD` and `repeat` is empty for one-off tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

/// A row of the `scheduler` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id.to_string(),
            date: record.date,
            title: record.title,
            comment: record.comment,
            repeat: record.repeat,
        }
    }
}

/// Outcome of marking a task as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// A one-off task was removed.
    Deleted { id: i64 },
    /// A recurring task was moved to its next date.
    Rescheduled { id: i64, next_date: String },
}
