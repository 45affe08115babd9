use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::Claims;
use shared_models::error::AppError;

use crate::models::{
    BookingError, BookingRequest, CreatePaymentIntentRequest, PaymentConfirmation,
};
use crate::services::admission::BookingAdmissionService;
use crate::services::payment::PaymentClient;
use crate::services::reconciliation::PaymentReconciliationService;

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub patient: Option<String>,
}

fn map_booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::NotFound => AppError::NotFound("Booking not found".to_string()),
        BookingError::ValidationError(msg) => AppError::Validation(msg),
        BookingError::DatabaseError(msg) => AppError::Database(msg),
        BookingError::PaymentNotConfigured => {
            AppError::ExternalService("Payment processor not configured".to_string())
        }
        BookingError::PaymentError(msg) => AppError::ExternalService(msg),
    }
}

/// POST /booking — public submission; duplicates are reported, not rejected.
#[axum::debug_handler]
pub async fn submit_booking(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingAdmissionService::new(&state);
    let admission = service
        .submit_booking(request)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(admission)))
}

/// GET /booking?patient= — a caller may only read their own bookings; the
/// patient parameter has to match the verified claim email.
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<AppConfig>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Value>, AppError> {
    let patient = query
        .patient
        .ok_or_else(|| AppError::BadRequest("patient query parameter is required".to_string()))?;

    if patient != claims.email {
        debug!(
            "Booking list denied: {} requested bookings of {}",
            claims.email, patient
        );
        return Err(AppError::Forbidden(
            "Cannot read another patient's bookings".to_string(),
        ));
    }

    let service = BookingAdmissionService::new(&state);
    let bookings = service
        .patient_bookings(&patient)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(bookings)))
}

/// GET /booking/{id}
#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<AppConfig>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = BookingAdmissionService::new(&state);
    let booking = service.get_booking(id).await.map_err(map_booking_error)?;

    Ok(Json(json!(booking)))
}

/// PATCH /booking/{id} — attach a completed payment. Authenticated but not
/// admin gated; a patient confirms their own payment.
#[axum::debug_handler]
pub async fn reconcile_booking(
    State(state): State<Arc<AppConfig>>,
    Path(id): Path<Uuid>,
    Json(confirmation): Json<PaymentConfirmation>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentReconciliationService::new(&state);
    let outcome = service
        .reconcile(id, confirmation)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(outcome)))
}

/// POST /create-payment-intent — obtain a client secret from the processor.
#[axum::debug_handler]
pub async fn create_payment_intent(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<Json<Value>, AppError> {
    let amount_cents = (request.price * 100.0).round() as i64;
    if amount_cents <= 0 {
        return Err(AppError::Validation("price must be positive".to_string()));
    }

    let client = PaymentClient::new(&state).map_err(map_booking_error)?;
    let intent = client
        .create_payment_intent(amount_cents)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({ "client_secret": intent.client_secret })))
}
