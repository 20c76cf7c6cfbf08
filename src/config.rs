//! Environment-driven configuration

use crate::infrastructure::StorageBackend;
use crate::infrastructure::database;
use anyhow::{Context, anyhow};
use log::warn;
use std::env;
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// Server configuration loaded from environment variables.
///
/// | Env Var                   | Default                 |
/// |---------------------------|-------------------------|
/// | `HOST`                    | `0.0.0.0`               |
/// | `PORT`                    | `3000`                  |
/// | `CORS_ORIGINS`            | `http://localhost:5173` |
/// | `STORAGE_BACKEND`         | `sqlite`                |
/// | `SCHEDULER_INTERVAL_SECS` | `60`                    |
/// | `STATIC_DIR`              | `public`                |
/// | `DATABASE_URL`            | `sqlite://content.db?mode=rwc` |
///
/// `DATABASE_URL` is only checked here; the pool itself is opened by
/// [`DatabaseConnection`](crate::infrastructure::database::DatabaseConnection).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub storage: StorageBackend,
    pub scheduler_interval: Duration,
    pub static_dir: String,
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage: StorageBackend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "sqlite".into())
            .parse()
            .map_err(|e: String| anyhow!(e))?;

        let scheduler_interval_secs: u64 = env::var("SCHEDULER_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .context("SCHEDULER_INTERVAL_SECS must be a valid u64")?;
        if scheduler_interval_secs == 0 {
            return Err(anyhow!("SCHEDULER_INTERVAL_SECS must be greater than zero"));
        }

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".into());

        let database_url = database::database_url();
        if storage == StorageBackend::Sqlite {
            database::connect_options(&database_url)?;
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            storage,
            scheduler_interval: Duration::from_secs(scheduler_interval_secs),
            static_dir,
            database_url,
        })
    }
}

/// Credentials and endpoint of the text generation API.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl AiConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let request_timeout_secs = match env::var("AI_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("ignoring invalid AI_REQUEST_TIMEOUT_SECS `{raw}`");
                DEFAULT_AI_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_AI_TIMEOUT_SECS,
        };

        Self {
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.into()),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
