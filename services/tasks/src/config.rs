/// Tasks service configuration loaded from environment variables.
#[derive(Debug)]
pub struct TasksConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3310). Env var: `TASKS_PORT`.
    pub tasks_port: u16,
}

impl TasksConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            tasks_port: std::env::var("TASKS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3310),
        }
    }
}
