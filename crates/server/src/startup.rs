use std::{future::Future, sync::Arc};

use axum::{http::HeaderValue, Router};
use configs::{AppConfig, Backend, CorsConfig};
use service::gapminder::{
    repo::seaorm::SeaOrmGapminderRepository, CsvGapminderSource, DatabaseGapminderSource, GapminderSource,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Only the configured front-end origin is allowed. Credentials are allowed, so
/// methods and headers are mirrored from the preflight instead of `*`.
pub fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origin: HeaderValue = cfg
        .allowed_origin
        .trim()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("cors.allowed_origin `{}`: {e}", cfg.allowed_origin)))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Pick the backing store named by `[dataset].backend`.
pub async fn build_source(cfg: &AppConfig) -> Result<Arc<dyn GapminderSource>, StartupError> {
    match cfg.dataset.backend {
        Backend::Csv => {
            let source = CsvGapminderSource::new(&cfg.dataset.csv_path);
            // The file is re-read per request, so a bad file now is not fatal.
            if let Err(e) = source.check_header().await {
                warn!(path = %source.path().display(), error = %e, "csv not readable at startup; requests will fail until it is");
            }
            info!(source = "csv", path = %source.path().display(), "gapminder source ready");
            Ok(Arc::new(source))
        }
        Backend::Database => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Any(anyhow::Error::new(e)))?;
            info!(source = "database", table = "gapminder_data", "gapminder source ready");
            Ok(Arc::new(DatabaseGapminderSource::new(SeaOrmGapminderRepository::new(db))))
        }
    }
}

/// Composition root: source, state, CORS and router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let source = build_source(cfg).await?;
    let cors = build_cors(&cfg.cors)?;
    Ok(routes::build_router(AppState::new(source), cors))
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        backend = ?cfg.dataset.backend,
        allowed_origin = %cfg.cors.allowed_origin,
        "starting gapminder server"
    );
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: load config, build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    serve(cfg, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            error!(service = "server", event = "signal_handler_failed", error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
