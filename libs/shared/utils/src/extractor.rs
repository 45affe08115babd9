use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::auth::Claims;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Authenticated guard. Verifies the bearer credential and attaches the
/// decoded claim to the request for downstream handlers. Runs before any
/// handler logic, so a failure here has no side effects.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Unauthenticated(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_value[7..];

    let claims = validate_token(token, &config.jwt_secret)
        .map_err(AppError::InvalidCredential)?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Fetch the claim attached by `auth_middleware`.
pub fn extract_claims<B>(request: &Request<B>) -> Result<Claims, AppError> {
    request
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| AppError::Unauthenticated("Claims not found in request extensions".to_string()))
}
