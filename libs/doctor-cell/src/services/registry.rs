use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{Doctor, DoctorError, RegisterDoctorRequest};

pub struct DoctorRegistryService {
    store: StoreClient,
}

impl DoctorRegistryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn register(&self, request: RegisterDoctorRequest) -> Result<Doctor, DoctorError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.specialty.trim().is_empty()
        {
            return Err(DoctorError::ValidationError(
                "name, email and specialty must not be empty".to_string(),
            ));
        }

        let doctor: Doctor = self
            .store
            .insert(
                "doctors",
                json!({
                    "name": request.name,
                    "email": request.email,
                    "specialty": request.specialty,
                    "image": request.image
                }),
            )
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        info!("Registered doctor {} ({})", doctor.name, doctor.email);
        Ok(doctor)
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, DoctorError> {
        self.store
            .find("doctors", &[])
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))
    }

    /// Remove by email, the registry's natural key. Returns the number of
    /// removed records.
    pub async fn remove(&self, email: &str) -> Result<usize, DoctorError> {
        let removed = self
            .store
            .delete("doctors", &[("email", email)])
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        debug!("Removed {} doctor record(s) for {}", removed.len(), email);
        Ok(removed.len())
    }
}
