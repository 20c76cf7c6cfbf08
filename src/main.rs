//! Content studio backend
//!
//! (c) Softlandia 2025

use content_studio::api;
use content_studio::config::ServerConfig;
use content_studio::core;
use content_studio::core::traits::PublishingService;
use content_studio::infrastructure;
use content_studio::infrastructure::StorageBackend;
use content_studio::infrastructure::database::DatabaseConnection;

use anyhow::{Context, anyhow};
use axum::Router;
use axum::http::{HeaderValue, Method};
use di::ServiceCollection;
use di_axum::RouterServiceProviderExtensions;
use log::{info, warn};
use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(serve(config))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let mut services = ServiceCollection::new();
    infrastructure::register(&mut services, config.storage);
    infrastructure::register_integrations(&mut services);
    core::register(&mut services);
    let provider = services
        .build_provider()
        .map_err(|e| anyhow!("failed to build the service provider: {e}"))?;

    match config.storage {
        StorageBackend::Sqlite => {
            provider
                .get_required::<DatabaseConnection>()
                .migrate()
                .await
                .context("failed to run database migrations")?;
            info!("using SQLite storage at {}", config.database_url);
        }
        StorageBackend::Memory => warn!("using in-memory storage, data is lost on restart"),
    }

    // background task for scheduled publishing
    let cancel = CancellationToken::new();
    let scheduler_handle = tokio::spawn(core::scheduler::run(
        provider.get_required::<dyn PublishingService>(),
        config.scheduler_interval,
        cancel.clone(),
    ));

    let origins = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin `{origin}`");
                None
            }
        })
        .collect::<Vec<_>>();

    let app = Router::new()
        .nest("/api", api::router())
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_headers(Any)
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::PATCH,
                        Method::DELETE,
                    ])
                    .allow_origin(origins),
            ),
        )
        .with_provider(provider);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await?;

    cancel.cancel();
    scheduler_handle
        .await
        .context("failed to join the scheduler task")?;
    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for the shutdown signal: {e}");
        // Without a signal handler, wait for the token instead of shutting down at once.
        cancel.cancelled().await;
        return;
    }
    info!("shutdown signal received");
    cancel.cancel();
}
