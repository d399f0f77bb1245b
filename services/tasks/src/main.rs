use sea_orm::Database;
use tracing::info;

use taskdesk_core::tracing::init_tracing;
use taskdesk_tasks::config::TasksConfig;
use taskdesk_tasks::router::build_router;
use taskdesk_tasks::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = TasksConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.tasks_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("tasks service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
