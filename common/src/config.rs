use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;

/// Process-wide configuration, loaded once from the environment.
///
/// Every key has a default so the server, migration runner and test suites
/// work without a `.env` file. `LOG_LEVEL` is not stored here: it is read
/// directly by the tracing `EnvFilter` in `logger::init_logging`.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub jwt_duration_minutes: i64,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads `.env` (if present) and initializes the singleton.
    pub fn init() -> &'static Self {
        dotenvy::dotenv().ok();
        Self::get()
    }

    /// Returns the configuration, reading the environment on first access.
    pub fn get() -> &'static Self {
        CONFIG.get_or_init(Self::from_env)
    }

    fn from_env() -> Self {
        let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "noticeboard".into());
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "data/noticeboard.db".into());
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "change_this_secret_in_production".into());
        let jwt_duration_minutes = env::var("JWT_DURATION_MINUTES")
            .ok()
            .and_then(|m| m.parse().ok())
            .unwrap_or(60);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into());
        let log_to_stdout = env::var("LOG_TO_STDOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);
        let max_page_size = env::var("MAX_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        Config {
            project_name,
            host,
            port,
            database_path,
            jwt_secret,
            jwt_duration_minutes,
            log_file,
            log_to_stdout,
            default_page_size,
            max_page_size,
        }
    }
}
