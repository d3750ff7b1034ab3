//! Route handlers
//!
//! Thin translation layer between HTTP and the registry. Handlers parse
//! the path and body, then wrap the registry's outcome in an
//! [`ApiResponse`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::models::{ApiResponse, DriverBody, DriverPayload};
use crate::api::MAX_NEAREST_DRIVERS;
use crate::coord::Location;
use crate::registry::{DriverId, DriverRegistry, RegistryError};

type Registry = Arc<DriverRegistry>;

fn status_for(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
        RegistryError::IndexRemoval { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub(crate) async fn health() -> &'static str {
    "OK"
}

pub(crate) async fn add_driver(
    State(registry): State<Registry>,
    payload: Result<Json<DriverPayload>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Ok(Json(payload)) = payload else {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(ApiResponse::error(
                "Set content-type application/json or check payload data",
            )),
        );
    };

    match registry.set(payload.driver_id, payload.location) {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok("Driver was added"))),
        Err(err) => (
            status_for(&err),
            Json(ApiResponse::error(format!("Could not add driver - {err}"))),
        ),
    }
}

pub(crate) async fn get_driver(
    State(registry): State<Registry>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let Ok(id) = id.parse::<DriverId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Could not convert string to integer")),
        );
    };

    match registry.get(id) {
        Ok(driver) => (
            StatusCode::OK,
            Json(ApiResponse::ok("Driver was found").with_driver(DriverBody::from(&driver))),
        ),
        Err(err) => (
            status_for(&err),
            Json(ApiResponse::error(format!("Could not get driver - {err}"))),
        ),
    }
}

pub(crate) async fn delete_driver(
    State(registry): State<Registry>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let Ok(id) = id.parse::<DriverId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Could not convert string to integer")),
        );
    };

    match registry.delete(id) {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok("Driver was deleted"))),
        Err(err) => (
            status_for(&err),
            Json(ApiResponse::error(format!(
                "Could not delete driver - {err}"
            ))),
        ),
    }
}

pub(crate) async fn nearest_drivers(
    State(registry): State<Registry>,
    Path((lat, lon)): Path<(String, String)>,
) -> (StatusCode, Json<ApiResponse>) {
    let Ok(lat) = lat.parse::<f64>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Bad latitude")),
        );
    };
    let Ok(lon) = lon.parse::<f64>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Bad longitude")),
        );
    };

    let drivers = registry.nearest(Location::new(lat, lon), MAX_NEAREST_DRIVERS);
    let bodies: Vec<DriverBody> = drivers.iter().map(DriverBody::from).collect();

    (
        StatusCode::OK,
        Json(ApiResponse::ok("Nearest drivers was found").with_drivers(bodies)),
    )
}
