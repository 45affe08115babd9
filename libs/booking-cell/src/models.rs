use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// A stored booking. The admission key is `(treatment, date, patient)`;
/// `slot` is informational and not part of the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub treatment: String,
    pub date: String,
    pub slot: String,
    pub patient: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Incoming booking submission. `date` stays an opaque calendar label and is
/// only ever compared by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub treatment: String,
    pub date: String,
    pub slot: String,
    pub patient: String,
}

/// Admission decision. A duplicate is reported, not rejected: the response
/// carries the pre-existing record and `accepted: false`.
#[derive(Debug, Serialize)]
pub struct BookingAdmission {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<Booking>,
}

/// Payment confirmation posted back by the client after the processor
/// completes a charge. Extra processor fields ride along opaquely and are
/// persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub transaction_id: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Outcome of attaching a payment to a booking. `matched == 0` means the
/// booking id matched nothing; the payment record is stored regardless.
#[derive(Debug, Serialize)]
pub struct ReconcileOutcome {
    pub matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Price in currency units; converted to cents for the processor.
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Payment processor not configured")]
    PaymentNotConfigured,

    #[error("Payment processor error: {0}")]
    PaymentError(String),
}
