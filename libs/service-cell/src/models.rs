use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A treatment offered by the clinic. `slots` is the full template of time
/// labels the treatment can ever be booked into on any day; the availability
/// endpoint returns a copy with the already-booked labels removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}

/// Name-only projection of a service record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceName {
    pub name: String,
}

/// The two booking fields the availability computation cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct BookedSlot {
    pub treatment: String,
    pub slot: String,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
