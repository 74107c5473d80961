//! taxoscope server
//!
//! - Subscribes to the configured stream source and builds the metric taxonomy
//! - Serves the HTML report on `/messages` (JSON on `/v1/taxonomy`)
//! - Ops endpoints: `/healthz`, `/readyz`, `/metrics`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taxoscope_core::error::{Result, TaxoscopeError};
use taxoscope_server::{app_state::AppState, config, ingest, router, source};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "taxoscope-server exiting");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(cfg);
    let source = source::from_config(&state.cfg().source);
    let ingestion = ingest::spawn_ingestion(&state, source);

    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TaxoscopeError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "taxoscope-server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TaxoscopeError::Internal(format!("server failed: {e}")));

    ingestion.abort();
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
