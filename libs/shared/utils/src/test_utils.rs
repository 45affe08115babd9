use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use shared_config::AppConfig;
use shared_models::auth::Claims;

pub struct TestConfig {
    pub jwt_secret: String,
    pub store_url: String,
    pub store_api_key: String,
    pub payment_secret_key: String,
    pub payment_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            store_url: "http://localhost:54321".to_string(),
            store_api_key: "test-api-key".to_string(),
            payment_secret_key: "sk_test_key".to_string(),
            payment_base_url: "http://localhost:54322".to_string(),
        }
    }
}

impl TestConfig {
    /// Point the store at a wiremock server.
    pub fn with_store_url(mut self, url: &str) -> Self {
        self.store_url = url.to_string();
        self
    }

    /// Point the payment processor at a wiremock server.
    pub fn with_payment_url(mut self, url: &str) -> Self {
        self.payment_base_url = url.to_string();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            payment_secret_key: self.payment_secret_key.clone(),
            payment_base_url: self.payment_base_url.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub email: String,
    pub role: Option<String>,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            email: "test@example.com".to_string(),
            role: None,
        }
    }
}

impl TestUser {
    pub fn patient(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: None,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: Some("admin".to_string()),
        }
    }

    pub fn to_claims(&self) -> Claims {
        let now = Utc::now();
        Claims {
            email: self.email.clone(),
            iat: now.timestamp() as u64,
            exp: (now + Duration::hours(1)).timestamp() as u64,
        }
    }

    /// Stored-user document as the role directory would return it.
    pub fn to_record(&self) -> serde_json::Value {
        match &self.role {
            Some(role) => json!({ "email": self.email, "role": role }),
            None => json!({ "email": self.email }),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(1));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "email": user.email,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(1))
    }
}
