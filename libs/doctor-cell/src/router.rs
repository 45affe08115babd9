use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;
use user_cell::guard::require_admin;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/doctor", get(handlers::list_doctors))
        .route("/doctor/{email}", delete(handlers::remove_doctor));

    // Outermost layer runs first: authenticate, then check the role.
    let admin_routes = Router::new()
        .route("/doctor", post(handlers::register_doctor))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
