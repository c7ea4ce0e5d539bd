use satsearch_web::catalog::Catalog;
use satsearch_web::config;
use satsearch_web::logging;
use satsearch_web::routes;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::read_config()?;
    let _logging_guard = logging::init_logging(&config.log_dir, "satsearch-web", &config.log_level)?;

    tracing::info!("Satellite search starting...");
    if !std::path::Path::new(&config::config_path()).exists() {
        tracing::warn!("Config file {} not found, using defaults", config::config_path());
    }
    tracing::info!("Loaded configuration: {:?}", config);

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let catalog = Catalog::new();
    catalog.spawn_initial_load(client, config.catalog_url.clone());

    let state = routes::AppState::new(catalog).context("Failed to compile page templates")?;
    let app = routes::router(state);

    let listener = TcpListener::bind(config.server_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.server_address()))?;
    tracing::info!("Serving satellite search on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
