use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::extractor::extract_claims;

use crate::models::UserError;
use crate::services::directory::UserDirectoryService;

/// Admin guard. Must be layered inside `auth_middleware`: it reads the claim
/// the authenticated guard attached and checks the role directory. A
/// principal with no directory record cannot be elevated and is rejected
/// outright.
pub async fn require_admin(
    State(config): State<Arc<AppConfig>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = extract_claims(&request)?;

    let directory = UserDirectoryService::new(&config);
    let user = directory.find_user(&claims.email).await.map_err(|e| match e {
        UserError::DatabaseError(msg) => AppError::Database(msg),
        UserError::TokenError(msg) => AppError::Internal(msg),
    })?;

    let Some(user) = user else {
        debug!("Admin check failed: no directory record for {}", claims.email);
        return Err(AppError::Forbidden("Unknown principal".to_string()));
    };

    if !user.is_admin() {
        debug!("Admin check failed: {} is not an admin", claims.email);
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }

    Ok(next.run(request).await)
}
