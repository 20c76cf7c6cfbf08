//! Domain services

use di::{Injectable, ServiceCollection};

pub mod error;
pub mod generation;
pub mod models;
pub mod password;
pub mod publishing;
pub mod scheduler;
pub mod services;
pub mod traits;

use generation::AiGenerationService;
use publishing::ContentPublisher;
use services::{AppContentService, AppPortfolioService, AppSettingsService, AppUserService};

/// Registers the domain services. They expect repositories, a `Notifier` and a `TextGenerator`
/// to be registered as well.
pub fn register(services: &mut ServiceCollection) {
    services
        .add(AppContentService::scoped())
        .add(AppPortfolioService::scoped())
        .add(AppSettingsService::scoped())
        .add(AppUserService::scoped())
        .add(ContentPublisher::scoped())
        .add(AiGenerationService::scoped());
}
