//! Pooled SQLite connection

use di::inject;
use di::injectable;
use anyhow::Context;
use log::{error, info};
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::Mutex;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://content.db?mode=rwc";

/// Parses a `sqlite:` connection string.
pub fn connect_options(url: &str) -> anyhow::Result<SqliteConnectOptions> {
    SqliteConnectOptions::from_str(url)
        .with_context(|| format!("DATABASE_URL `{url}` is not a valid SQLite connection string"))
}

/// `DATABASE_URL` from the environment, or the local default file.
pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned())
}

/// Pool handed out instead of a fresh one while tests run against their own database.
static TEST_POOL: Mutex<Option<SqlitePool>> = Mutex::new(None);

pub struct DatabaseConnection {
    connection: SqlitePool,
}

#[injectable]
impl DatabaseConnection {
    #[inject]
    pub fn create() -> DatabaseConnection {
        if let Some(pool) = Self::test_pool() {
            return DatabaseConnection { connection: pool };
        }

        dotenvy::dotenv().ok();
        // ServerConfig::from_env rejects bad URLs at startup, so this only covers other callers.
        let options = connect_options(&database_url()).unwrap_or_else(|e| {
            error!("{e:#}; falling back to {DEFAULT_DATABASE_URL}");
            SqliteConnectOptions::new()
                .filename("content.db")
                .create_if_missing(true)
        });

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(options);

        DatabaseConnection { connection: pool }
    }
}

impl DatabaseConnection {
    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.connection).await?;
        info!("database migrations applied");
        Ok(())
    }

    /// Makes every connection created through DI use `pool`.
    pub fn set_test_pool(pool: SqlitePool) {
        if let Ok(mut slot) = TEST_POOL.lock() {
            *slot = Some(pool);
        }
    }

    pub fn clear_test_pool() {
        if let Ok(mut slot) = TEST_POOL.lock() {
            *slot = None;
        }
    }

    fn test_pool() -> Option<SqlitePool> {
        TEST_POOL.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl DerefMut for DatabaseConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.connection
    }
}
