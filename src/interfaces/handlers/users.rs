use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::user::UpdateRoleRequest,
    errors::AppError,
    use_cases::extractors::AdminSession,
    AppState,
};

#[instrument(skip(_admin, state))]
pub async fn list_users(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let users = state.user_handler.list_users().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "users": users })))
}

#[instrument(skip(admin, state, data), fields(actor = %admin.0.id))]
pub async fn update_user_role(
    admin: AdminSession,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateRoleRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.user_handler
        .update_role(&admin.0, &user_id, data.into_inner().role)
        .await?;

    Ok(HttpResponse::Ok().json(user))
}
