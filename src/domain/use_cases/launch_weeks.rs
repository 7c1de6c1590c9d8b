use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::{
    entities::launch_week::{LaunchWeek, NewLaunchWeekRequest, ReserveSlotRequest},
    errors::AppError,
    repositories::launch_week::{LaunchWeekRepository, SlotReservation},
    utils::valid_uuid::valid_uuid,
};

pub struct LaunchWeekHandler {
    pub launch_week_repo: Arc<dyn LaunchWeekRepository>,
}

impl LaunchWeekHandler {
    pub fn new(launch_week_repo: Arc<dyn LaunchWeekRepository>) -> Self {
        LaunchWeekHandler { launch_week_repo }
    }

    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Current and upcoming weeks.
    pub async fn list_launch_weeks(&self) -> Result<Vec<LaunchWeek>, AppError> {
        self.launch_week_repo.list_launch_weeks(Self::today()).await
    }

    pub async fn get_launch_week(&self, id: &str) -> Result<LaunchWeek, AppError> {
        let valid_id = valid_uuid(id)?;
        self.launch_week_repo.get_launch_week(&valid_id).await.map_err(not_found)
    }

    pub async fn create_launch_week(&self, request: NewLaunchWeekRequest) -> Result<LaunchWeek, AppError> {
        request.validate()?;

        let week = self.launch_week_repo.create_launch_week(&request.into_insert()).await?;
        tracing::info!(id = %week.id, start = %week.start_date, "Launch week created");
        Ok(week)
    }

    /// Places a startup into a week. A full week or a startup already in it is a conflict.
    pub async fn reserve_slot(&self, id: &str, request: ReserveSlotRequest) -> Result<LaunchWeek, AppError> {
        request.validate()?;
        let valid_id = valid_uuid(id)?;

        match self.launch_week_repo
            .reserve_slot(&valid_id, &request.startup_id)
            .await
            .map_err(not_found)?
        {
            SlotReservation::Reserved(week) => {
                tracing::info!(week = %week.id, startup = %request.startup_id, "Launch slot reserved");
                Ok(week)
            }
            SlotReservation::AlreadyReserved(_) => {
                Err(AppError::Conflict("Startup already holds a slot in this week".into()))
            }
            SlotReservation::Full(_) => Err(AppError::Conflict("Launch week is full".into())),
        }
    }

    pub async fn release_slot(&self, id: &str, startup_id: &str) -> Result<LaunchWeek, AppError> {
        let valid_id = valid_uuid(id)?;
        self.launch_week_repo.release_slot(&valid_id, startup_id).await
    }

    pub async fn delete_launch_week(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.launch_week_repo.delete_launch_week(&valid_id).await
    }

    pub async fn count_launch_weeks(&self) -> Result<i64, AppError> {
        self.launch_week_repo.count_launch_weeks().await
    }
}

fn not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Launch week not found".to_string()),
        _ => e,
    }
}
