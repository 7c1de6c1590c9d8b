use actix_web::{web, HttpResponse, Responder};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
    entities::directory::{DirectoryCreatedResponse, DirectoryListResponse},
    errors::AppError,
    handlers::json_error::json_error,
    use_cases::extractors::AdminSession,
    AppState,
};

/// Every stored directory document.
///
/// Store failures are logged and answered with a 500 carrying an `error` field.
#[instrument(skip(state))]
pub async fn list_directories(state: web::Data<AppState>) -> HttpResponse {
    match state.directory_handler.list_directories().await {
        Ok(directories) => HttpResponse::Ok().json(DirectoryListResponse { directories }),
        Err(e) => {
            tracing::error!("Failed to fetch directories: {}", e);
            json_error(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch directories",
            )
        }
    }
}

#[instrument(skip(_admin, state, document))]
pub async fn create_directory(
    _admin: AdminSession,
    state: web::Data<AppState>,
    document: web::Json<Map<String, Value>>,
) -> Result<impl Responder, AppError> {
    let id = state.directory_handler
        .create_directory(document.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(DirectoryCreatedResponse { id }))
}

#[instrument(skip(_admin, state))]
pub async fn delete_directory(
    _admin: AdminSession,
    directory_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.directory_handler.delete_directory(&directory_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
