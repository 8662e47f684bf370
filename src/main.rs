use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};

use foods_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB pool; with lazy connect this only validates the URL
    let db_pool = api::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to create database pool")?;
    if let Err(e) = api::db::check_connection(&db_pool).await {
        warn!("Database not reachable at startup, requests will fail until it is: {}", e);
    }

    let (host, port) = (cfg.host.clone(), cfg.port);
    // Clones share one pool, so closing this one at shutdown closes the router's too
    let db = db_pool.clone();
    let app = api::build_router(api::AppState::new(db_pool, cfg))?;

    // Bind and serve
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("foods-api listening on http://{}", addr);
    info!("API docs at http://{}{}/", addr, api::openapi::DOCS_PATH);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = api::db::close_pool(db).await {
        error!("Failed to close database pool: {}", e);
    }

    info!("foods-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
