use actix_web::{web, HttpRequest, HttpResponse, Responder};
use subtle::ConstantTimeEq;
use tracing::instrument;

use crate::{
    entities::checkout::{CheckoutRequest, WebhookEvent},
    errors::AppError,
    use_cases::extractors::CurrentSession,
    AppState,
};

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[instrument(skip(session, state, data), fields(user = %session.0.id))]
pub async fn start_checkout(
    session: CurrentSession,
    state: web::Data<AppState>,
    data: web::Json<CheckoutRequest>,
) -> Result<impl Responder, AppError> {
    let checkout = state.checkout_handler
        .start_checkout(&session.0, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(checkout))
}

/// Payment provider callback. Public, authenticated by the shared webhook secret.
#[instrument(skip(req, state, body))]
pub async fn payment_webhook(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let Some(expected) = state.config.payments_webhook_secret.as_deref() else {
        tracing::warn!("Webhook received but no webhook secret is configured");
        return Err(AppError::ServiceUnavailable("Payments are not configured".into()));
    };

    let provided = req.headers()
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !secret_matches(provided, expected) {
        tracing::warn!("Webhook rejected: bad secret");
        return Err(AppError::UnauthorizedAccess);
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("Malformed webhook payload: {}", e)))?;

    let ack = state.checkout_handler.handle_webhook(event).await?;
    Ok(HttpResponse::Ok().json(ack))
}

fn secret_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
