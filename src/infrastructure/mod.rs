//! Storage backends and outbound integrations

use di::{Injectable, ServiceCollection};
use std::str::FromStr;

pub mod database;
pub mod entities;
pub mod memory;
pub mod openai;
pub mod repositories;
pub mod telegram;
pub mod traits;

use database::DatabaseConnection;
use memory::{
    InMemoryContentRepository, InMemoryPortfolioRepository, InMemorySettingsRepository,
    InMemoryUserRepository,
};
use openai::OpenAiTextGenerator;
use repositories::{
    DbContentRepository, DbPortfolioRepository, DbSettingsRepository, DbUserRepository,
};
use telegram::TelegramNotifier;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(format!("unknown storage backend `{other}`")),
        }
    }
}

/// Registers the repositories of the chosen backend.
///
/// In-memory repositories hold the data themselves, so they are singletons. The SQLite ones are
/// scoped and share the pooled [`DatabaseConnection`].
pub fn register(services: &mut ServiceCollection, backend: StorageBackend) {
    match backend {
        StorageBackend::Memory => {
            services
                .add(InMemoryContentRepository::singleton())
                .add(InMemoryPortfolioRepository::singleton())
                .add(InMemorySettingsRepository::singleton())
                .add(InMemoryUserRepository::singleton());
        }
        StorageBackend::Sqlite => {
            services
                .add(DatabaseConnection::singleton())
                .add(DbContentRepository::scoped())
                .add(DbPortfolioRepository::scoped())
                .add(DbSettingsRepository::scoped())
                .add(DbUserRepository::scoped());
        }
    }
}

/// Registers the outbound integrations: the Telegram relay and the OpenAI text generator.
pub fn register_integrations(services: &mut ServiceCollection) {
    services
        .add(TelegramNotifier::singleton())
        .add(OpenAiTextGenerator::singleton());
}
