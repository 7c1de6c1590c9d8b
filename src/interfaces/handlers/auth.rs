use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::session::SessionResponse,
    errors::AppError,
    use_cases::extractors::MaybeSession,
    utils::redirect::redirect_to,
    AppState,
};

/// Current session, `{}` when signed out.
///
/// The user record is synced on every call and the cookie is re-issued so a
/// role change made by an admin reaches the token.
#[instrument(skip(session, state))]
pub async fn get_session(
    session: MaybeSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let Some(session) = session.0 else {
        return Ok(HttpResponse::Ok().json(serde_json::json!({})));
    };

    let synced = state.user_handler.sync_session(&session).await?;
    let (token, expires) = state.session_service.issue(&synced)?;

    Ok(HttpResponse::Ok()
        .cookie(state.session_service.session_cookie(token))
        .json(SessionResponse {
            user: synced,
            expires: expires.to_rfc3339(),
        }))
}

#[instrument(skip(state))]
pub async fn sign_out(state: web::Data<AppState>) -> impl Responder {
    let mut response = redirect_to(&state.config.unauthorized_redirect);
    if let Err(e) = response.add_cookie(&state.session_service.removal_cookie()) {
        tracing::error!("Failed to clear session cookie: {}", e);
    }
    response
}
