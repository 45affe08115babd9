use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{BookingError, PaymentIntent};

/// Client for the external payment processor. The processor is opaque to
/// this system: create a charge, hand the client secret back to the caller.
pub struct PaymentClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl PaymentClient {
    pub fn new(config: &AppConfig) -> Result<Self, BookingError> {
        if !config.is_payments_configured() {
            return Err(BookingError::PaymentNotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            secret_key: config.payment_secret_key.clone(),
            base_url: config.payment_base_url.clone(),
        })
    }

    /// POST /v1/payment_intents
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
    ) -> Result<PaymentIntent, BookingError> {
        info!("Creating payment intent for {} cents", amount_cents);

        let url = format!("{}/v1/payment_intents", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .json(&json!({
                "amount": amount_cents,
                "currency": "usd",
                "payment_method_types": ["card"]
            }))
            .send()
            .await
            .map_err(|e| BookingError::PaymentError(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| BookingError::PaymentError(e.to_string()))?;

        debug!("Payment processor response: {} - {}", status, response_text);

        if !status.is_success() {
            error!("Payment intent creation failed: {} - {}", status, response_text);
            return Err(BookingError::PaymentError(format!(
                "HTTP {}: {}",
                status, response_text
            )));
        }

        let intent: PaymentIntent = serde_json::from_str(&response_text)
            .map_err(|e| BookingError::PaymentError(format!(
                "Failed to parse payment intent response: {}",
                e
            )))?;

        info!("Created payment intent {}", intent.id);
        Ok(intent)
    }
}
