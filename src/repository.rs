use std::sync::MutexGuard;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row};
use tracing::debug;

use crate::db::DbPool;
use crate::error::{Result, TodoError};
use crate::models::Todo;

const ORIGIN: &str = "repository";

const SELECT_TODO: &str =
    "SELECT id, title, notes, creation_date, due_date, completed FROM todos";

/// Persistence capability for todos.
///
/// Lookups by id fail with `NotExist` when no record matches. Updates never
/// touch `creation_date`: the stored value always wins over the caller's.
pub trait TodoRepository: Send + Sync {
    fn add(&self, todo: Todo) -> Result<Todo>;
    fn update_one(&self, id: u64, todo: Todo) -> Result<Todo>;
    fn update_many(&self, todos: Vec<Todo>) -> Result<Vec<Todo>>;
    fn get_one(&self, id: u64) -> Result<Todo>;
    fn get_all(&self) -> Result<Vec<Todo>>;
    fn delete_one(&self, id: u64) -> Result<()>;
    fn delete_all(&self) -> Result<()>;
}

pub struct SqliteTodoRepository {
    pool: DbPool,
}

impl SqliteTodoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.pool
            .lock()
            .map_err(|_| TodoError::internal(ORIGIN, "database connection lock poisoned"))
    }
}

impl TodoRepository for SqliteTodoRepository {
    fn add(&self, todo: Todo) -> Result<Todo> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO todos (title, notes, creation_date, due_date, completed)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &todo.title,
                &todo.notes,
                todo.creation_date.timestamp(),
                todo.due_date.timestamp(),
                todo.completed as i32,
            ),
        )?;
        let id = conn.last_insert_rowid();

        let mut stmt = conn.prepare(&format!("{SELECT_TODO} WHERE id = ?1"))?;
        let todo = stmt.query_row([id], todo_from_row)?;
        Ok(todo)
    }

    fn update_one(&self, id: u64, mut todo: Todo) -> Result<Todo> {
        let conn = self.lock()?;
        let existing = find_existing(&conn, id)?;

        todo.id = existing.id;
        todo.creation_date = existing.creation_date;
        write_todo(&conn, &todo)?;
        Ok(todo)
    }

    fn update_many(&self, todos: Vec<Todo>) -> Result<Vec<Todo>> {
        let mut conn = self.lock()?;

        let mut updated = Vec::with_capacity(todos.len());
        for mut todo in todos {
            let existing = find_existing(&conn, todo.id)?;
            todo.creation_date = existing.creation_date;
            updated.push(todo);
        }

        let tx = conn.transaction()?;
        for todo in &updated {
            write_todo(&tx, todo)?;
        }
        tx.commit()?;

        debug!(count = updated.len(), "Wrote todo batch");
        Ok(updated)
    }

    fn get_one(&self, id: u64) -> Result<Todo> {
        let conn = self.lock()?;
        find_existing(&conn, id)
    }

    fn get_all(&self) -> Result<Vec<Todo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{SELECT_TODO} ORDER BY id ASC"))?;
        let todos = stmt
            .query_map([], todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    fn delete_one(&self, id: u64) -> Result<()> {
        let conn = self.lock()?;
        let existing = find_existing(&conn, id)?;
        conn.execute("DELETE FROM todos WHERE id = ?1", [row_id(existing.id)?])?;
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM todos", [])?;
        debug!(rows, "Deleted all todos");
        Ok(())
    }
}

fn not_exist(id: u64) -> TodoError {
    TodoError::not_exist(ORIGIN, format!("todo {id} does not exist"))
}

// SQLite ids are signed; anything past i64::MAX can never have been stored.
fn row_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| not_exist(id))
}

fn find_existing(conn: &Connection, id: u64) -> Result<Todo> {
    let mut stmt = conn.prepare(&format!("{SELECT_TODO} WHERE id = ?1"))?;
    let mut rows = stmt.query([row_id(id)?])?;

    if let Some(row) = rows.next()? {
        Ok(todo_from_row(row)?)
    } else {
        Err(not_exist(id))
    }
}

fn write_todo(conn: &Connection, todo: &Todo) -> Result<()> {
    conn.execute(
        "UPDATE todos
         SET title = ?1, notes = ?2, creation_date = ?3, due_date = ?4, completed = ?5
         WHERE id = ?6",
        (
            &todo.title,
            &todo.notes,
            todo.creation_date.timestamp(),
            todo.due_date.timestamp(),
            todo.completed as i32,
            row_id(todo.id)?,
        ),
    )?;
    Ok(())
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let id: i64 = row.get(0)?;
    Ok(Todo {
        id: id as u64,
        title: row.get(1)?,
        notes: row.get(2)?,
        creation_date: timestamp_column(row, 3)?,
        due_date: timestamp_column(row, 4)?,
        completed: row.get::<_, i32>(5)? != 0,
    })
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}
