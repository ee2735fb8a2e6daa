use std::net::Ipv4Addr;

use tracing::info;

use todos::{config::Config, create_app, db, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("reading configuration");

    let db = db::init_db(&config.database_path).expect("initializing database");
    info!(path = %config.database_path.display(), "Opened database");

    let app = create_app(AppState::new(db, config.base_path));
    let addr = (Ipv4Addr::UNSPECIFIED, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("binding listener");

    info!("running on {addr:?}");

    axum::serve(listener, app).await.expect("failed serving");
}
