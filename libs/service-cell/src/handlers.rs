use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::ServiceError;
use crate::services::availability::AvailabilityService;

#[derive(Debug, Deserialize)]
pub struct ServiceQuery {
    /// `projection=name` returns name-only records.
    pub projection: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

fn map_service_error(e: ServiceError) -> AppError {
    match e {
        ServiceError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<ServiceQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);

    if query.projection.as_deref() == Some("name") {
        let names = service.list_service_names().await.map_err(map_service_error)?;
        return Ok(Json(json!(names)));
    }

    let services = service.list_services().await.map_err(map_service_error)?;
    Ok(Json(json!(services)))
}

#[axum::debug_handler]
pub async fn available_services(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Computing availability for date {:?}", query.date);

    let service = AvailabilityService::new(&state);
    let services = service
        .available_services(query.date.as_deref())
        .await
        .map_err(map_service_error)?;

    Ok(Json(json!(services)))
}
