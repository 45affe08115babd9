use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{DoctorError, RegisterDoctorRequest};
use crate::services::registry::DoctorRegistryService;

fn map_doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::ValidationError(msg) => AppError::Validation(msg),
        DoctorError::DatabaseError(msg) => AppError::Database(msg),
    }
}

/// POST /doctor — admin gated by the router.
#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let registry = DoctorRegistryService::new(&state);
    let doctor = registry.register(request).await.map_err(map_doctor_error)?;

    Ok(Json(json!(doctor)))
}

/// GET /doctor
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let registry = DoctorRegistryService::new(&state);
    let doctors = registry.list().await.map_err(map_doctor_error)?;

    Ok(Json(json!(doctors)))
}

/// DELETE /doctor/{email}
#[axum::debug_handler]
pub async fn remove_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let registry = DoctorRegistryService::new(&state);
    let removed = registry.remove(&email).await.map_err(map_doctor_error)?;

    Ok(Json(json!({ "removed": removed })))
}
