use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::launch_week::validate_startup_id;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const META_LAUNCH_WEEK_ID: &str = "launch_week_id";
pub const META_STARTUP_ID: &str = "startup_id";
pub const META_USER_ID: &str = "user_id";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub launch_week_id: Uuid,

    #[validate(length(min = 1, max = 64), custom(function = "validate_startup_id"))]
    pub startup_id: String,
}

/// What the payment provider needs to open a hosted checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionRequest {
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
    pub client_reference_id: String,
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Payment provider event delivered to the webhook.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    pub object: CheckoutSessionObject,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Launch slot purchased through a completed checkout.
#[derive(Debug, PartialEq)]
pub struct PaidSlot {
    pub launch_week_id: Uuid,
    pub startup_id: String,
}

impl CheckoutSessionObject {
    pub fn paid_slot(&self) -> Option<PaidSlot> {
        let launch_week_id = self.metadata
            .get(META_LAUNCH_WEEK_ID)
            .and_then(|id| Uuid::parse_str(id).ok())?;
        let startup_id = self.metadata.get(META_STARTUP_ID)?.clone();

        Some(PaidSlot { launch_week_id, startup_id })
    }
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    pub fulfilled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_slot_requires_both_metadata_keys() {
        let week = Uuid::new_v4();
        let event: WebhookEvent = serde_json::from_value(serde_json::json!({
            "type": CHECKOUT_COMPLETED,
            "data": {"object": {"id": "cs_1", "metadata": {
                "launch_week_id": week.to_string(),
                "startup_id": "acme"
            }}}
        }))
        .unwrap();

        assert_eq!(
            event.data.object.paid_slot(),
            Some(PaidSlot { launch_week_id: week, startup_id: "acme".into() })
        );

        let partial = CheckoutSessionObject {
            id: None,
            metadata: HashMap::from([(META_STARTUP_ID.to_string(), "acme".to_string())]),
        };
        assert_eq!(partial.paid_slot(), None);
    }
}
