pub mod admission;
pub mod payment;
pub mod reconciliation;
