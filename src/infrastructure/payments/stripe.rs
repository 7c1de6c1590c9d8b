use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use zeroize::Zeroizing;

use crate::{
    entities::checkout::{CheckoutSession, CheckoutSessionRequest},
    errors::AppError,
    repositories::payment_gateway::PaymentGateway,
    settings::AppConfig,
};

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

/// Checkout sessions created through the Stripe REST API.
#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: Option<Zeroizing<String>>,
    price_id: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client error: {}", e)))?;

        Ok(StripeGateway {
            client,
            api_base: config.payments_api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            secret_key: config.payments_secret_key.clone().map(Zeroizing::new),
            price_id: config.payments_price_id.clone(),
        })
    }

    fn form_fields(&self, price_id: &str, request: &CheckoutSessionRequest) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "payment".to_string()),
            ("line_items[0][price]".to_string(), price_id.to_string()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
            ("client_reference_id".to_string(), request.client_reference_id.clone()),
        ];

        if let Some(email) = &request.customer_email {
            form.push(("customer_email".to_string(), email.clone()));
        }

        for (key, value) in &request.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        form
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, AppError> {
        let (Some(secret_key), Some(price_id)) = (&self.secret_key, &self.price_id) else {
            return Err(AppError::ServiceUnavailable("Payments are not configured".into()));
        };

        let response = self.client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(secret_key.as_str())
            .form(&self.form_fields(price_id, request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProviderError>()
                .await
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("provider answered {}", status));
            tracing::warn!("Checkout session creation failed: {}", message);
            return Err(AppError::PaymentProvider(message));
        }

        let session = response.json::<CheckoutSession>().await?;
        tracing::info!(session_id = %session.id, "Checkout session created");
        Ok(session)
    }
}
