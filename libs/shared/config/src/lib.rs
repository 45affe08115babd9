use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_api_key: String,
    pub jwt_secret: String,
    pub payment_secret_key: String,
    pub payment_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("STORE_URL not set, using empty value");
                    String::new()
                }),
            store_api_key: env::var("STORE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORE_API_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| {
                    warn!("ACCESS_TOKEN_SECRET not set, using empty value");
                    String::new()
                }),
            payment_secret_key: env::var("PAYMENT_SECRET_KEY")
                .unwrap_or_else(|_| {
                    warn!("PAYMENT_SECRET_KEY not set, using empty value");
                    String::new()
                }),
            payment_base_url: env::var("PAYMENT_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("PAYMENT_BASE_URL not set, using default");
                    "https://api.stripe.com".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.store_url.is_empty()
            && !self.store_api_key.is_empty()
            && !self.jwt_secret.is_empty()
    }

    pub fn is_payments_configured(&self) -> bool {
        !self.payment_secret_key.is_empty() && !self.payment_base_url.is_empty()
    }
}
