use chrono::Utc;
use tracing::error;

use crate::error::{Result, TodoError, INTERNAL_MESSAGE};
use crate::models::Todo;
use crate::repository::TodoRepository;

pub const INVALID_ID: &str = "todo: id must be greater than 0";

const ORIGIN: &str = "service";

/// Application capability for managing todos.
///
/// Every error returned from here is safe to show to a client: internal
/// failures arrive as a generic `Internal` error without their cause.
pub trait TodoService: Send + Sync {
    fn add(&self, todo: Todo) -> Result<Todo>;
    fn update_one(&self, id: u64, todo: Todo) -> Result<Todo>;
    fn update_many(&self, todos: Vec<Todo>) -> Result<Vec<Todo>>;
    fn get_one(&self, id: u64) -> Result<Todo>;
    fn get_all(&self) -> Result<Vec<Todo>>;
    fn delete_one(&self, id: u64) -> Result<()>;
    fn delete_all(&self) -> Result<()>;
}

pub struct TodoManager<R> {
    repo: R,
}

impl<R: TodoRepository> TodoManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: TodoRepository> TodoService for TodoManager<R> {
    fn add(&self, mut todo: Todo) -> Result<Todo> {
        todo.creation_date = Utc::now();
        todo.completed = false;
        todo.validate()?;

        self.repo.add(todo).map_err(sanitize)
    }

    fn update_one(&self, id: u64, todo: Todo) -> Result<Todo> {
        check_id(id)?;
        todo.validate()?;

        self.repo.update_one(id, todo).map_err(sanitize)
    }

    fn update_many(&self, todos: Vec<Todo>) -> Result<Vec<Todo>> {
        for todo in &todos {
            check_id(todo.id)?;
            todo.validate()?;
        }

        self.repo.update_many(todos).map_err(sanitize)
    }

    fn get_one(&self, id: u64) -> Result<Todo> {
        check_id(id)?;
        self.repo.get_one(id).map_err(sanitize)
    }

    fn get_all(&self) -> Result<Vec<Todo>> {
        self.repo.get_all().map_err(sanitize)
    }

    fn delete_one(&self, id: u64) -> Result<()> {
        check_id(id)?;
        self.repo.delete_one(id).map_err(sanitize)
    }

    fn delete_all(&self) -> Result<()> {
        self.repo.delete_all().map_err(sanitize)
    }
}

fn check_id(id: u64) -> Result<()> {
    if id == 0 {
        return Err(TodoError::validation(ORIGIN, INVALID_ID));
    }
    Ok(())
}

fn sanitize(err: TodoError) -> TodoError {
    if err.kind().is_public() {
        return err;
    }

    error!(
        origin = err.origin(),
        kind = %err.kind(),
        description = err.kind().description(),
        at = %err.timestamp(),
        error = ?err,
        "Todo operation failed"
    );
    TodoError::internal(ORIGIN, INTERNAL_MESSAGE)
}
