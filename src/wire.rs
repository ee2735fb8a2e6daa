//! JSON payloads exchanged on `/todos` and their mapping to [`Todo`].

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::TodoError;
use crate::models::Todo;

pub const WIRE_DATE_FORMAT: &str = "%d-%m-%y %H:%M";
pub const DATE_FORMAT_HINT: &str = "date format required DD-MM-YY HH:mm";
pub const REQUIRED_TITLE: &str = "todo schema: \"title\" field is required";
pub const ID_NOT_UNSIGNED: &str = "id is not an unsigned integer";
pub const ID_NEGATIVE: &str = "id cannot be less than 0";

const ORIGIN: &str = "/todos";

// Two-digit years from 69 up belong to the previous century.
const FIRST_PREVIOUS_CENTURY_YEAR: i32 = 2069;

/// A request body that could be decoded but not understood.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct MalformedRequest(pub String);

pub fn parse_date(text: &str) -> Result<DateTime<Utc>, MalformedRequest> {
    let malformed = || MalformedRequest(DATE_FORMAT_HINT.to_string());

    let mut naive =
        NaiveDateTime::parse_from_str(text.trim(), WIRE_DATE_FORMAT).map_err(|_| malformed())?;
    if naive.year() >= FIRST_PREVIOUS_CENTURY_YEAR {
        naive = naive.with_year(naive.year() - 100).ok_or_else(malformed)?;
    }
    Ok(naive.and_utc())
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Reads a todo id from a path segment.
pub fn parse_id(raw: &str) -> Result<u64, MalformedRequest> {
    match raw.parse::<u64>() {
        Ok(id) => Ok(id),
        Err(_) if raw.parse::<i64>().is_ok() => Err(MalformedRequest(ID_NEGATIVE.to_string())),
        Err(_) => Err(MalformedRequest(ID_NOT_UNSIGNED.to_string())),
    }
}

/// Rejects a todo whose title is blank.
pub fn check_title(todo: &Todo) -> Result<(), TodoError> {
    if todo.title.trim().is_empty() {
        return Err(TodoError::validation(ORIGIN, REQUIRED_TITLE));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub due_date: String,
}

impl CreateTodo {
    pub fn into_todo(self) -> Result<Todo, MalformedRequest> {
        Ok(Todo {
            due_date: parse_date(&self.due_date)?,
            title: self.title,
            notes: self.notes,
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
}

impl UpdateTodo {
    pub fn into_todo(self) -> Result<Todo, MalformedRequest> {
        Ok(Todo {
            due_date: parse_date(&self.due_date)?,
            title: self.title,
            notes: self.notes,
            completed: self.completed,
            ..Default::default()
        })
    }
}

/// One element of a batch update; carries its own id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUpdateTodo {
    pub id: u64,
    #[serde(flatten)]
    pub fields: UpdateTodo,
}

impl BatchUpdateTodo {
    pub fn into_todo(self) -> Result<Todo, MalformedRequest> {
        let mut todo = self.fields.into_todo()?;
        todo.id = self.id;
        Ok(todo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: u64,
    pub title: String,
    pub notes: String,
    pub creation_date: String,
    pub due_date: String,
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            creation_date: format_date(&todo.creation_date),
            due_date: format_date(&todo.due_date),
            title: todo.title,
            notes: todo.notes,
            completed: todo.completed,
        }
    }
}
