use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Role-directory record. `email` is the unique key; `role` is present only
/// once a user has been promoted. Remaining profile fields are carried
/// opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Result of a login upsert: the stored record plus a fresh session token.
#[derive(Debug, Serialize)]
pub struct UpsertOutcome {
    pub result: Vec<Value>,
    pub token: String,
}

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Token error: {0}")]
    TokenError(String),
}
