use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    entities::launch_week::{LaunchWeek, LaunchWeekInsert, LaunchWeekRow},
    errors::AppError,
    repositories::sqlx_repo::{SqlxLaunchWeekRepo, SqlxRepo},
};

/// Outcome of a conditional slot reservation.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotReservation {
    Reserved(LaunchWeek),
    AlreadyReserved(LaunchWeek),
    Full(LaunchWeek),
}

#[async_trait]
pub trait LaunchWeekRepository: Send + Sync {
    async fn create_launch_week(&self, week: &LaunchWeekInsert) -> Result<LaunchWeek, AppError>;
    async fn get_launch_week(&self, id: &Uuid) -> Result<LaunchWeek, AppError>;
    /// Weeks whose end date is on or after `from`, earliest first.
    async fn list_launch_weeks(&self, from: NaiveDate) -> Result<Vec<LaunchWeek>, AppError>;
    async fn count_launch_weeks(&self) -> Result<i64, AppError>;
    /// Appends the startup only while the week has a free slot and does not list it yet.
    async fn reserve_slot(&self, id: &Uuid, startup_id: &str) -> Result<SlotReservation, AppError>;
    async fn release_slot(&self, id: &Uuid, startup_id: &str) -> Result<LaunchWeek, AppError>;
    async fn delete_launch_week(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxLaunchWeekRepo {
    pub fn new(repo: SqlxRepo) -> Self {
        SqlxLaunchWeekRepo { repo }
    }
}

#[async_trait]
impl LaunchWeekRepository for SqlxLaunchWeekRepo {
    async fn create_launch_week(&self, week: &LaunchWeekInsert) -> Result<LaunchWeek, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, LaunchWeekRow>(
            r#"
            INSERT INTO launch_weeks (id, start_date, end_date, startups, max_slots, created_at, updated_at)
            VALUES ($1, $2, $3, '{}', $4, NOW(), NOW())
            RETURNING *
            "#
        )
        .bind(week.id)
        .bind(week.start_date)
        .bind(week.end_date)
        .bind(week.max_slots)
        .fetch_one(&pool)
        .await?;

        Ok(row.into())
    }

    async fn get_launch_week(&self, id: &Uuid) -> Result<LaunchWeek, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, LaunchWeekRow>("SELECT * FROM launch_weeks WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await?;

        Ok(row.into())
    }

    async fn list_launch_weeks(&self, from: NaiveDate) -> Result<Vec<LaunchWeek>, AppError> {
        let pool = self.repo.pool().await?;

        let rows = sqlx::query_as::<_, LaunchWeekRow>(
            "SELECT * FROM launch_weeks WHERE end_date >= $1 ORDER BY start_date ASC"
        )
        .bind(from)
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().map(LaunchWeek::from).collect())
    }

    async fn count_launch_weeks(&self) -> Result<i64, AppError> {
        let pool = self.repo.pool().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM launch_weeks")
            .fetch_one(&pool)
            .await?;

        Ok(count)
    }

    async fn reserve_slot(&self, id: &Uuid, startup_id: &str) -> Result<SlotReservation, AppError> {
        let pool = self.repo.pool().await?;

        // Single statement so concurrent reservations cannot overfill a week
        let reserved = sqlx::query_as::<_, LaunchWeekRow>(
            r#"
            UPDATE launch_weeks SET
                startups = array_append(startups, $2),
                updated_at = NOW()
            WHERE id = $1
              AND cardinality(startups) < max_slots
              AND NOT ($2 = ANY(startups))
            RETURNING *
            "#
        )
        .bind(id)
        .bind(startup_id)
        .fetch_optional(&pool)
        .await?;

        if let Some(row) = reserved {
            return Ok(SlotReservation::Reserved(row.into()));
        }

        let week = self.get_launch_week(id).await?;
        if week.contains(startup_id) {
            Ok(SlotReservation::AlreadyReserved(week))
        } else {
            Ok(SlotReservation::Full(week))
        }
    }

    async fn release_slot(&self, id: &Uuid, startup_id: &str) -> Result<LaunchWeek, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, LaunchWeekRow>(
            r#"
            UPDATE launch_weeks SET
                startups = array_remove(startups, $2),
                updated_at = NOW()
            WHERE id = $1 AND $2 = ANY(startups)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(startup_id)
        .fetch_optional(&pool)
        .await?;

        row.map(LaunchWeek::from)
            .ok_or_else(|| AppError::NotFound("Startup is not part of this launch week".into()))
    }

    async fn delete_launch_week(&self, id: &Uuid) -> Result<(), AppError> {
        let pool = self.repo.pool().await?;

        let result = sqlx::query("DELETE FROM launch_weeks WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Launch week not found".into()));
        }

        Ok(())
    }
}
