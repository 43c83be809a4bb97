pub mod handlers;
mod types;

pub use types::HealthResponse;

use crate::{
    Error, Result,
    config::Config,
    inference::{HttpPoseDetector, PoseDetector},
    predict::PredictionHandler,
    response_log::ResponseLog,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(predictor: PredictionHandler, max_body_bytes: usize) -> Router {
    let app_state = handlers::AppState { predictor };

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    let responses = if config.response_log.path.is_empty() {
        info!("Response log disabled");
        ResponseLog::disabled()
    } else {
        ResponseLog::open(&config.response_log.path).await?
    };

    if config.inference.url.is_empty() {
        return Err(Error::config("inference.url must not be empty"));
    }
    info!("Forwarding pose detection to {}", config.inference.url);
    let detector: Arc<dyn PoseDetector> = Arc::new(HttpPoseDetector::new(&config.inference)?);

    let app = router(
        PredictionHandler::new(detector, responses.clone()),
        config.server.max_body_bytes,
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    responses.shutdown().await;
    info!("Server stopped");

    served?;
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
