use async_trait::async_trait;

use crate::{
    entities::checkout::{CheckoutSession, CheckoutSessionRequest},
    errors::AppError,
};

/// Hosted checkout offered by the payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, AppError>;
}
