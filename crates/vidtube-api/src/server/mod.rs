//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};
use vidtube_common::{AppConfig, AppError, JwtService};
use vidtube_core::SnowflakeGenerator;
use vidtube_db::Database;
use vidtube_media::HttpMediaStore;
use vidtube_service::{ServiceContext, ServiceContextBuilder};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after rate limiting so health checks are never throttled.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let router = apply_rate_limit(create_router(), &state.config().rate_limit)?;
    let router = router.merge(health_routes());
    let router = apply_middleware(router, state.config());
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// The returned `Database` handle is kept by the caller so the pool can be
/// closed once the server has drained.
pub async fn create_app_state(config: AppConfig) -> Result<(AppState, Database), AppError> {
    info!("Connecting to PostgreSQL...");
    let database = Database::connect(&config.database)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let state = init_state(config, &database).await?;
    info!("PostgreSQL connection established");

    Ok((state, database))
}

/// Migrate and wire the services on an open database.
///
/// The pool is closed before any error is returned.
async fn init_state(config: AppConfig, database: &Database) -> Result<AppState, AppError> {
    let result = async {
        let service_context = build_service_context(&config, database)?;
        database
            .migrate()
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
        Ok::<_, AppError>(service_context)
    }
    .await;

    match result {
        Ok(service_context) => Ok(AppState::new(service_context, config)),
        Err(e) => {
            database.close().await;
            Err(e)
        }
    }
}

/// Wire the services on top of an open database
fn build_service_context(
    config: &AppConfig,
    database: &Database,
) -> Result<ServiceContext, AppError> {
    let media_store = HttpMediaStore::from_config(&config.media)
        .map_err(|e| AppError::Config(format!("Media service: {e}")))?;

    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    ServiceContextBuilder::new()
        .account_repo(Arc::new(database.accounts()))
        .channel_repo(Arc::new(database.channels()))
        .media_store(Arc::new(media_store))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let (state, database) = create_app_state(config).await?;
    let app = create_app(state)?;

    let result = run_server(app, &addr).await;

    database.close().await;
    info!("Server stopped");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
