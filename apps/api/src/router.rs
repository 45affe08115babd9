use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::booking_routes;
use doctor_cell::router::doctor_routes;
use service_cell::router::service_routes;
use shared_config::AppConfig;
use user_cell::router::user_routes;

// The HTTP surface is flat, so cell routers are merged rather than nested.
pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctors Portal is running" }))
        .merge(service_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(booking_routes(state.clone()))
        .merge(doctor_routes(state))
}
