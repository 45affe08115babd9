use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::store::StoreClient;
use shared_utils::jwt::issue_token;

use crate::models::{UpsertOutcome, UserError, UserRecord};

/// Role directory over the `users` collection, keyed by email.
pub struct UserDirectoryService {
    store: StoreClient,
    jwt_secret: String,
}

impl UserDirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            jwt_secret: config.jwt_secret.clone(),
        }
    }

    /// Idempotent login upsert: store or overwrite the profile keyed by
    /// email, then issue a fresh session token for that email.
    pub async fn upsert_user(&self, email: &str, profile: Value) -> Result<UpsertOutcome, UserError> {
        let mut document = match profile {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        document.insert("email".to_string(), json!(email));

        let result = self
            .store
            .upsert("users", "email", Value::Object(document))
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let token = issue_token(email, &self.jwt_secret).map_err(UserError::TokenError)?;

        info!("Upserted user {} and issued session token", email);
        Ok(UpsertOutcome { result, token })
    }

    pub async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, UserError> {
        self.store
            .find_one("users", &[("email", email)])
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    /// Missing record reads as "not an admin", never as an error.
    pub async fn is_admin(&self, email: &str) -> Result<bool, UserError> {
        let user = self.find_user(email).await?;
        Ok(user.map(|u| u.is_admin()).unwrap_or(false))
    }

    /// Set `role = "admin"` on the target record. Returns the number of
    /// records matched; 0 means the target does not exist.
    pub async fn promote_to_admin(&self, email: &str) -> Result<usize, UserError> {
        let updated = self
            .store
            .update("users", &[("email", email)], json!({ "role": "admin" }))
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        debug!("Promotion of {} matched {} record(s)", email, updated.len());
        Ok(updated.len())
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, UserError> {
        self.store
            .find("users", &[])
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}
