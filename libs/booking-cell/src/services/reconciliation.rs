use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{BookingError, PaymentConfirmation, ReconcileOutcome};

/// Attaches completed-payment evidence to bookings. Payment records are
/// append-only and never mutated after the fact.
pub struct PaymentReconciliationService {
    store: StoreClient,
}

impl PaymentReconciliationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Persist the payment record, then mark the booking paid. The two writes
    /// are sequential and not atomic; the payment insert must come first so
    /// the evidence survives even when the booking patch matches nothing.
    pub async fn reconcile(
        &self,
        booking_id: Uuid,
        confirmation: PaymentConfirmation,
    ) -> Result<ReconcileOutcome, BookingError> {
        let mut record = confirmation.details.clone();
        record.insert("transaction_id".to_string(), json!(confirmation.transaction_id));
        record.insert("booking_id".to_string(), json!(booking_id));

        let _: Value = self
            .store
            .insert("payments", Value::Object(record))
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let id = booking_id.to_string();
        let updated = self
            .store
            .update(
                "bookings",
                &[("id", id.as_str())],
                json!({
                    "paid": true,
                    "transaction_id": confirmation.transaction_id
                }),
            )
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let matched = updated.len();
        if matched == 0 {
            warn!(
                "Reconciliation for booking {} matched nothing; payment {} stored anyway",
                booking_id, confirmation.transaction_id
            );
        } else {
            info!(
                "Booking {} reconciled with transaction {}",
                booking_id, confirmation.transaction_id
            );
        }

        let booking = updated
            .into_iter()
            .next()
            .and_then(|value| serde_json::from_value(value).ok());

        Ok(ReconcileOutcome { matched, booking })
    }
}
