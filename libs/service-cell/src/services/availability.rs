use std::collections::HashSet;

use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{BookedSlot, Service, ServiceError, ServiceName};

pub struct AvailabilityService {
    store: StoreClient,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// All service records, full slot templates included.
    pub async fn list_services(&self) -> Result<Vec<Service>, ServiceError> {
        self.store
            .find("services", &[])
            .await
            .map_err(|e| ServiceError::DatabaseError(e.to_string()))
    }

    /// Name-only listing for pickers that never need prices or slots.
    pub async fn list_service_names(&self) -> Result<Vec<ServiceName>, ServiceError> {
        self.store
            .find_with_select("services", &[], "name")
            .await
            .map_err(|e| ServiceError::DatabaseError(e.to_string()))
    }

    /// Services for `date` with each slot template reduced to the labels not
    /// yet booked that day. Without a date no filter is applied and the full
    /// templates come back untouched.
    pub async fn available_services(
        &self,
        date: Option<&str>,
    ) -> Result<Vec<Service>, ServiceError> {
        let mut services = self.list_services().await?;

        let Some(date) = date else {
            debug!("No date supplied, returning unfiltered slot templates");
            return Ok(services);
        };

        let bookings: Vec<BookedSlot> = self
            .store
            .find("bookings", &[("date", date)])
            .await
            .map_err(|e| ServiceError::DatabaseError(e.to_string()))?;

        debug!("Found {} bookings on {}", bookings.len(), date);
        subtract_booked(&mut services, &bookings);

        Ok(services)
    }
}

/// Remove each service's already-booked slot labels, preserving template order.
fn subtract_booked(services: &mut [Service], bookings: &[BookedSlot]) {
    for service in services.iter_mut() {
        let booked: HashSet<&str> = bookings
            .iter()
            .filter(|b| b.treatment == service.name)
            .map(|b| b.slot.as_str())
            .collect();

        service.slots.retain(|slot| !booked.contains(slot.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn service(name: &str, slots: &[&str]) -> Service {
        Service {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: 30.0,
            slots: slots.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn booked(treatment: &str, slot: &str) -> BookedSlot {
        BookedSlot {
            treatment: treatment.to_string(),
            slot: slot.to_string(),
        }
    }

    #[test]
    fn removes_only_booked_slots_for_matching_treatment() {
        let mut services = vec![
            service("Checkup", &["09:00", "10:00", "11:00"]),
            service("Cleaning", &["09:00", "10:00"]),
        ];
        let bookings = vec![booked("Checkup", "10:00")];

        subtract_booked(&mut services, &bookings);

        assert_eq!(services[0].slots, vec!["09:00", "11:00"]);
        assert_eq!(services[1].slots, vec!["09:00", "10:00"]);
    }

    #[test]
    fn preserves_template_order() {
        let mut services = vec![service("Checkup", &["11:00", "09:00", "10:00"])];
        let bookings = vec![booked("Checkup", "09:00")];

        subtract_booked(&mut services, &bookings);

        assert_eq!(services[0].slots, vec!["11:00", "10:00"]);
    }

    #[test]
    fn booked_slot_unknown_to_template_changes_nothing() {
        let mut services = vec![service("Checkup", &["09:00"])];
        let bookings = vec![booked("Checkup", "23:00")];

        subtract_booked(&mut services, &bookings);

        assert_eq!(services[0].slots, vec!["09:00"]);
    }

    #[test]
    fn fully_booked_service_ends_up_with_no_slots() {
        let mut services = vec![service("Checkup", &["09:00", "10:00"])];
        let bookings = vec![booked("Checkup", "09:00"), booked("Checkup", "10:00")];

        subtract_booked(&mut services, &bookings);

        assert!(services[0].slots.is_empty());
    }
}
