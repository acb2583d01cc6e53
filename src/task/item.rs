use crate::datetime::parse_user_date;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task row. `id` is assigned by the store and doubles as the
/// identity key for the reminder fired set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub text: String,
    /// Stored due-date string (`D/M/YYYY` or `D-M-YYYY`, optional time).
    /// `None` means the task has no due time.
    pub user_date: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: String, user_date: Option<String>) -> Self {
        Self {
            id: 0, // assigned on insert
            text,
            user_date,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Local wall-clock instant this task is due, if its stored date parses.
    pub fn due_instant(&self) -> Option<NaiveDateTime> {
        self.user_date.as_deref().and_then(parse_user_date)
    }
}
