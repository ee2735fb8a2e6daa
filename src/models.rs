use chrono::{DateTime, Utc};

use crate::error::{Result, TodoError};

pub const INVALID_DUE_DATE: &str = "todo: due date is not valid";

const ORIGIN: &str = "todo";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub notes: String,
    pub creation_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}

impl Todo {
    /// Rejects a due date lying before the current time.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<()> {
        if self.due_date.timestamp() < now.timestamp() {
            return Err(TodoError::validation(ORIGIN, INVALID_DUE_DATE));
        }
        Ok(())
    }
}
