//! pageviews server
//!
//! - Counter endpoints: /counters and /api/pageViews (GET, PUT, OPTIONS)
//! - Ops: /healthz, /readyz, /metrics
//! - Graceful shutdown on Ctrl-C / SIGTERM

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use pageviews_core::error::{PageViewsError, Result};
use pageviews_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "pageviews exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| PageViewsError::Config(format!("server.listen: {e}")))?;

    let state = AppState::connect(cfg).await?;
    tracing::info!(
        backend = state.counters().store().backend(),
        path_rule = ?state.counters().path_rule(),
        "counter store ready"
    );
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "pageviews starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PageViewsError::Config(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| PageViewsError::Config(format!("server failed: {e}")))
}

async fn shutdown_signal(state: AppState) {
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
    state.metrics().set_draining();
    tracing::info!("signal received, draining and shutting down");
}
