use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::guard::require_admin;
use crate::handlers;

pub fn user_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/user/{email}", put(handlers::upsert_user))
        .route("/admin/{email}", get(handlers::check_admin));

    let authenticated_routes = Router::new()
        .route("/user", get(handlers::list_users))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Outermost layer runs first: authenticate, then check the role.
    let admin_routes = Router::new()
        .route("/user/admin/{email}", put(handlers::promote_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .with_state(state)
}
