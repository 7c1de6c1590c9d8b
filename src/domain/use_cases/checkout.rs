use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        checkout::{
            CheckoutRequest, CheckoutSession, CheckoutSessionRequest, WebhookAck, WebhookEvent,
            CHECKOUT_COMPLETED, META_LAUNCH_WEEK_ID, META_STARTUP_ID, META_USER_ID,
        },
        session::Session,
    },
    errors::AppError,
    repositories::{
        launch_week::{LaunchWeekRepository, SlotReservation},
        payment_gateway::PaymentGateway,
    },
};

pub struct CheckoutHandler {
    pub launch_week_repo: Arc<dyn LaunchWeekRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub public_base_url: String,
}

impl CheckoutHandler {
    pub fn new(
        launch_week_repo: Arc<dyn LaunchWeekRepository>,
        gateway: Arc<dyn PaymentGateway>,
        public_base_url: &str,
    ) -> Self {
        CheckoutHandler {
            launch_week_repo,
            gateway,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Opens a hosted checkout for one slot in a launch week.
    pub async fn start_checkout(
        &self,
        session: &Session,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, AppError> {
        request.validate()?;

        let week = self.launch_week_repo
            .get_launch_week(&request.launch_week_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Launch week not found".into()),
                _ => e,
            })?;

        if week.contains(&request.startup_id) {
            return Err(AppError::Conflict("Startup already holds a slot in this week".into()));
        }
        if week.is_full() {
            return Err(AppError::Conflict("Launch week is full".into()));
        }

        let session_request = CheckoutSessionRequest {
            success_url: format!("{}/launch?checkout=success", self.public_base_url),
            cancel_url: format!("{}/launch?checkout=cancelled", self.public_base_url),
            customer_email: session.email.clone(),
            client_reference_id: session.id.clone(),
            metadata: vec![
                (META_LAUNCH_WEEK_ID.to_string(), week.id.to_string()),
                (META_STARTUP_ID.to_string(), request.startup_id.clone()),
                (META_USER_ID.to_string(), session.id.clone()),
            ],
        };

        let checkout = self.gateway.create_checkout_session(&session_request).await?;
        tracing::info!(checkout = %checkout.id, week = %week.id, startup = %request.startup_id, "Checkout started");

        Ok(checkout)
    }

    /// Fulfils a completed checkout by placing the startup into its week.
    ///
    /// Unknown event types and events without slot metadata are acknowledged
    /// without side effects so the provider stops redelivering them.
    pub async fn handle_webhook(&self, event: WebhookEvent) -> Result<WebhookAck, AppError> {
        if event.kind != CHECKOUT_COMPLETED {
            tracing::debug!(kind = %event.kind, "Ignoring webhook event");
            return Ok(WebhookAck { received: true, fulfilled: false });
        }

        let Some(slot) = event.data.object.paid_slot() else {
            tracing::warn!(event = ?event.id, "Completed checkout without slot metadata");
            return Ok(WebhookAck { received: true, fulfilled: false });
        };

        let fulfilled = match self.launch_week_repo
            .reserve_slot(&slot.launch_week_id, &slot.startup_id)
            .await?
        {
            SlotReservation::Reserved(_) | SlotReservation::AlreadyReserved(_) => true,
            SlotReservation::Full(week) => {
                tracing::error!(
                    week = %week.id,
                    startup = %slot.startup_id,
                    checkout = ?event.data.object.id,
                    "Paid checkout could not be placed, launch week is full"
                );
                false
            }
        };

        Ok(WebhookAck { received: true, fulfilled })
    }
}
