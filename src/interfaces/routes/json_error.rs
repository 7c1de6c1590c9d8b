use actix_web::web;

use crate::errors::AppError;

const JSON_LIMIT: usize = 256 * 1024;

/// Malformed bodies and query strings become `400 { "error": ... }`.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, req| {
                tracing::debug!(path = %req.path(), "Rejected JSON payload: {}", err);
                AppError::InvalidInput(format!("JSON payload error: {}", err)).into()
            }),
    );

    cfg.app_data(
        web::QueryConfig::default().error_handler(|err, _req| {
            AppError::InvalidInput(format!("Query string error: {}", err)).into()
        }),
    );
}
