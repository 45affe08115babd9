use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{Booking, BookingAdmission, BookingError, BookingRequest};

/// Admits new bookings, enforcing (by detection, not rejection) the
/// one-booking-per-treatment-per-patient-per-day rule.
pub struct BookingAdmissionService {
    store: StoreClient,
}

impl BookingAdmissionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Check-then-insert admission. The existence check and the insert are
    /// two store round trips with no lock between them; a racing duplicate
    /// can slip through and is left to out-of-band cleanup.
    pub async fn submit_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingAdmission, BookingError> {
        validate_request(&request)?;

        let existing: Option<Booking> = self
            .store
            .find_one(
                "bookings",
                &[
                    ("treatment", request.treatment.as_str()),
                    ("date", request.date.as_str()),
                    ("patient", request.patient.as_str()),
                ],
            )
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        // The record is inserted even when a duplicate was found; the caller
        // is only told the submission was not accepted.
        let inserted: Booking = self
            .store
            .insert(
                "bookings",
                json!({
                    "treatment": request.treatment,
                    "date": request.date,
                    "slot": request.slot,
                    "patient": request.patient,
                    "paid": false
                }),
            )
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        match existing {
            Some(existing) => {
                warn!(
                    "Duplicate booking for {} / {} / {}; reporting the prior record",
                    existing.treatment, existing.date, existing.patient
                );
                Ok(BookingAdmission {
                    accepted: false,
                    existing: Some(existing),
                    inserted: None,
                })
            }
            None => {
                info!(
                    "Accepted booking {} for {} on {} at {}",
                    inserted.id, inserted.patient, inserted.date, inserted.slot
                );
                Ok(BookingAdmission {
                    accepted: true,
                    existing: None,
                    inserted: Some(inserted),
                })
            }
        }
    }

    /// All bookings belonging to one patient.
    pub async fn patient_bookings(&self, patient: &str) -> Result<Vec<Booking>, BookingError> {
        debug!("Listing bookings for {}", patient);
        self.store
            .find("bookings", &[("patient", patient)])
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, BookingError> {
        let id = id.to_string();
        let booking: Option<Booking> = self
            .store
            .find_one("bookings", &[("id", id.as_str())])
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        booking.ok_or(BookingError::NotFound)
    }
}

fn validate_request(request: &BookingRequest) -> Result<(), BookingError> {
    let required = [
        ("treatment", &request.treatment),
        ("date", &request.date),
        ("slot", &request.slot),
        ("patient", &request.patient),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(BookingError::ValidationError(format!(
                "{} must not be empty",
                field
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request() -> BookingRequest {
        BookingRequest {
            treatment: "Checkup".to_string(),
            date: "2024-01-01".to_string(),
            slot: "09:00".to_string(),
            patient: "a@x.com".to_string(),
        }
    }

    #[test]
    fn complete_request_passes_validation() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn empty_fields_fail_validation() {
        for field in ["treatment", "date", "slot", "patient"] {
            let mut req = request();
            match field {
                "treatment" => req.treatment.clear(),
                "date" => req.date.clear(),
                "slot" => req.slot.clear(),
                _ => req.patient.clear(),
            }

            let err = validate_request(&req).unwrap_err();
            assert_matches!(err, BookingError::ValidationError(ref msg) if msg.contains(field));
        }
    }

    #[test]
    fn whitespace_only_fields_fail_validation() {
        let mut req = request();
        req.slot = "   ".to_string();
        assert!(validate_request(&req).is_err());
    }
}
