use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::launch_week::{LaunchWeekResponse, NewLaunchWeekRequest, ReserveSlotRequest},
    errors::AppError,
    use_cases::{extractors::AdminSession, launch_weeks::LaunchWeekHandler},
    AppState,
};

#[instrument(skip(state))]
pub async fn list_launch_weeks(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let today = LaunchWeekHandler::today();
    let weeks: Vec<LaunchWeekResponse> = state.launch_week_handler
        .list_launch_weeks()
        .await?
        .iter()
        .map(|week| week.to_response(today))
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "launchWeeks": weeks })))
}

#[instrument(skip(state))]
pub async fn get_launch_week(
    week_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let week = state.launch_week_handler.get_launch_week(&week_id).await?;
    Ok(HttpResponse::Ok().json(week.to_response(LaunchWeekHandler::today())))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_launch_week(
    _admin: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<NewLaunchWeekRequest>,
) -> Result<impl Responder, AppError> {
    let week = state.launch_week_handler
        .create_launch_week(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(week.to_response(LaunchWeekHandler::today())))
}

#[instrument(skip(_admin, state))]
pub async fn delete_launch_week(
    _admin: AdminSession,
    week_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.launch_week_handler.delete_launch_week(&week_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_admin, state, data))]
pub async fn reserve_slot(
    _admin: AdminSession,
    week_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ReserveSlotRequest>,
) -> Result<impl Responder, AppError> {
    let week = state.launch_week_handler
        .reserve_slot(&week_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(week.to_response(LaunchWeekHandler::today())))
}

#[instrument(skip(_admin, state))]
pub async fn release_slot(
    _admin: AdminSession,
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (week_id, startup_id) = path.into_inner();
    let week = state.launch_week_handler
        .release_slot(&week_id, &startup_id)
        .await?;

    Ok(HttpResponse::Ok().json(week.to_response(LaunchWeekHandler::today())))
}
