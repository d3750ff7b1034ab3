//! HTTP API
//!
//! Exposes the registry over REST. Drivers report positions with
//! `POST /api/driver/`; clients fetch or remove a driver by id and list
//! the closest live drivers with `GET /api/driver/{lat}/{lon}/nearest`.
//! Every reply uses the [`ApiResponse`] envelope.

mod models;
mod routes;

pub use models::{ApiResponse, DriverBody, DriverPayload};

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::registry::DriverRegistry;

/// Most drivers a nearest query will return.
pub const MAX_NEAREST_DRIVERS: usize = 10;

/// Builds the API router backed by `registry`.
pub fn router(registry: Arc<DriverRegistry>) -> Router {
    Router::new()
        .route("/api/driver/", post(routes::add_driver))
        .route(
            "/api/driver/{id}",
            get(routes::get_driver).delete(routes::delete_driver),
        )
        .route(
            "/api/driver/{lat}/{lon}/nearest",
            get(routes::nearest_drivers),
        )
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(registry)
}

/// Serves the API on `bind_addr` until `shutdown` resolves, then drains
/// in-flight requests before returning.
pub async fn serve(
    bind_addr: SocketAddr,
    registry: Arc<DriverRegistry>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(shutdown)
        .await
}
