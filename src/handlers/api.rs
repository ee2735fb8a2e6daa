use axum::extract::State;
use axum::{http::StatusCode, Json};
use tracing::info;

use crate::handlers::error::{ApiError, ResultExt};
use crate::handlers::extract::{JsonBody, RequestPath, TodoId};
use crate::models::Todo;
use crate::wire::{check_title, BatchUpdateTodo, CreateTodo, TodoResponse, UpdateTodo};
use crate::AppState;

fn respond_all(todos: Vec<Todo>) -> Json<Vec<TodoResponse>> {
    Json(todos.into_iter().map(TodoResponse::from).collect())
}

pub async fn create_todo(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
    JsonBody(req): JsonBody<CreateTodo>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let todo = req.into_todo().at_path(&path)?;
    check_title(&todo).at_path(&path)?;

    let todo = state.todos.add(todo).at_path(&path)?;
    info!(id = todo.id, title = %todo.title, "Created todo");
    Ok((StatusCode::CREATED, Json(todo.into())))
}

pub async fn list_todos(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.todos.get_all().at_path(&path)?;
    info!(count = todos.len(), "Listed todos");
    Ok(respond_all(todos))
}

pub async fn update_todos(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
    JsonBody(req): JsonBody<Vec<BatchUpdateTodo>>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let mut todos = Vec::with_capacity(req.len());
    for item in req {
        let todo = item.into_todo().at_path(&path)?;
        check_title(&todo).at_path(&path)?;
        todos.push(todo);
    }

    let todos = state.todos.update_many(todos).at_path(&path)?;
    info!(count = todos.len(), "Updated todos");
    Ok(respond_all(todos))
}

pub async fn delete_todos(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
) -> Result<StatusCode, ApiError> {
    state.todos.delete_all().at_path(&path)?;
    info!("Deleted all todos");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_todo(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.todos.get_one(id).at_path(&path)?;
    Ok(Json(todo.into()))
}

pub async fn update_todo(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
    TodoId(id): TodoId,
    JsonBody(req): JsonBody<UpdateTodo>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = req.into_todo().at_path(&path)?;
    check_title(&todo).at_path(&path)?;

    let todo = state.todos.update_one(id, todo).at_path(&path)?;
    info!(id = todo.id, completed = todo.completed, "Updated todo");
    Ok(Json(todo.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    RequestPath(path): RequestPath,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    state.todos.delete_one(id).at_path(&path)?;
    info!(id, "Deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
