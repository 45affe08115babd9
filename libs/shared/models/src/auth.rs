use serde::{Deserialize, Serialize};

/// Decoded identity payload attached to a request once its bearer token
/// has been verified. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}
