//! HTTP surface
//!
//! Read-only JSON endpoints over a [`QueryEngine`] loaded before the
//! listener binds.

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, ErrorResponse};
pub use handlers::AppState;

use crate::query::QueryEngine;

pub fn build_router(engine: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/passengers", get(handlers::list_passengers))
        .route("/api/passengers/:id", get(handlers::get_passenger))
        .route(
            "/api/passengers/survived/:status",
            get(handlers::passengers_by_survival),
        )
        .route(
            "/api/passengers/class/:class_num",
            get(handlers::passengers_by_class),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(addr: SocketAddr, engine: QueryEngine) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    let local = listener.local_addr().context("reading bound address")?;

    info!(passengers = engine.len(), "Server running at http://{}", local);
    info!("List endpoint: GET http://{}/api/passengers", local);

    axum::serve(listener, build_router(AppState::new(engine)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
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
                tracing::warn!("failed to listen for SIGTERM: {}", e);
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
    info!("shutdown signal received");
}
