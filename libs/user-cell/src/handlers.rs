use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::UserError;
use crate::services::directory::UserDirectoryService;

fn map_user_error(e: UserError) -> AppError {
    match e {
        UserError::DatabaseError(msg) => AppError::Database(msg),
        UserError::TokenError(msg) => AppError::Internal(msg),
    }
}

/// PUT /user/{email} — login upsert; answers with the stored record and a
/// fresh session token.
#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
    Json(profile): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let directory = UserDirectoryService::new(&state);
    let outcome = directory
        .upsert_user(&email, profile)
        .await
        .map_err(map_user_error)?;

    Ok(Json(json!({
        "result": outcome.result,
        "token": outcome.token
    })))
}

/// GET /admin/{email} — public boolean probe used by the client to decide
/// whether to show admin navigation.
#[axum::debug_handler]
pub async fn check_admin(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let directory = UserDirectoryService::new(&state);
    let admin = directory.is_admin(&email).await.map_err(map_user_error)?;

    Ok(Json(json!({ "admin": admin })))
}

/// PUT /user/admin/{email} — promote the target to admin. The router layers
/// the authenticated and admin guards in front of this handler.
#[axum::debug_handler]
pub async fn promote_admin(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Promoting {} to admin", email);

    let directory = UserDirectoryService::new(&state);
    let matched = directory
        .promote_to_admin(&email)
        .await
        .map_err(map_user_error)?;

    Ok(Json(json!({ "matched": matched })))
}

/// GET /user — list every directory record. Authenticated.
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let directory = UserDirectoryService::new(&state);
    let users = directory.list_users().await.map_err(map_user_error)?;

    Ok(Json(json!(users)))
}
