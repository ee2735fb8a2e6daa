pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod wire;

use std::sync::Arc;

use axum::{routing::get, Router};
use db::DbPool;
use repository::SqliteTodoRepository;
use service::{TodoManager, TodoService};

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoService>,
    pub base_path: Arc<String>,
}

impl AppState {
    /// Wires the SQLite repository and the todo service over `db`.
    pub fn new(db: DbPool, base_path: impl Into<String>) -> Self {
        let repo = SqliteTodoRepository::new(db);
        AppState {
            todos: Arc::new(TodoManager::new(repo)),
            base_path: Arc::new(base_path.into()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let base_path = state.base_path.clone();

    let app_routes = Router::new()
        .route(
            "/todos",
            get(handlers::api::list_todos)
                .post(handlers::api::create_todo)
                .put(handlers::api::update_todos)
                .delete(handlers::api::delete_todos),
        )
        .route(
            "/todos/{id}",
            get(handlers::api::get_todo)
                .put(handlers::api::update_todo)
                .delete(handlers::api::delete_todo),
        )
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(tower_http::compression::CompressionLayer::new()),
        )
        .with_state(state);

    tracing::info!("base_path: {base_path:?}");

    if base_path.is_empty() {
        app_routes
    } else {
        Router::new().nest(&*base_path, app_routes)
    }
}
