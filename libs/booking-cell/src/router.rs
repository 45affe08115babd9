use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/booking", post(handlers::submit_booking))
        .route("/create-payment-intent", post(handlers::create_payment_intent));

    let protected_routes = Router::new()
        .route("/booking", get(handlers::list_bookings))
        .route("/booking/{id}", get(handlers::get_booking))
        .route("/booking/{id}", patch(handlers::reconcile_booking))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
