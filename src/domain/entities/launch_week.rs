use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

const MAX_SLOTS_LIMIT: i32 = 100;
const MAX_STARTUP_ID_LENGTH: u64 = 64;

/// A scheduled window in which a bounded number of startups are featured.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchWeek {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub startups: Vec<String>,
    pub max_slots: i32,
}

#[derive(Debug, sqlx::FromRow)]
pub struct LaunchWeekRow {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub startups: Vec<String>,
    pub max_slots: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LaunchWeekRow> for LaunchWeek {
    fn from(row: LaunchWeekRow) -> Self {
        LaunchWeek {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            startups: row.startups,
            max_slots: row.max_slots,
        }
    }
}

impl LaunchWeek {
    pub fn remaining_slots(&self) -> i32 {
        (self.max_slots - self.startups.len() as i32).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.remaining_slots() == 0
    }

    pub fn contains(&self, startup_id: &str) -> bool {
        self.startups.iter().any(|s| s == startup_id)
    }

    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn to_response(&self, today: NaiveDate) -> LaunchWeekResponse {
        LaunchWeekResponse {
            id: self.id,
            start_date: self.start_date,
            end_date: self.end_date,
            startups: self.startups.clone(),
            max_slots: self.max_slots,
            remaining_slots: self.remaining_slots(),
            is_current: self.is_active_on(today),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchWeekResponse {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub startups: Vec<String>,
    pub max_slots: i32,
    pub remaining_slots: i32,
    pub is_current: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_week_dates"))]
pub struct NewLaunchWeekRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(range(min = 1, max = MAX_SLOTS_LIMIT, message = "Slot count must be between 1 and 100"))]
    pub max_slots: i32,
}

impl NewLaunchWeekRequest {
    pub fn into_insert(self) -> LaunchWeekInsert {
        LaunchWeekInsert {
            id: Uuid::new_v4(),
            start_date: self.start_date,
            end_date: self.end_date,
            max_slots: self.max_slots,
        }
    }
}

#[derive(Debug)]
pub struct LaunchWeekInsert {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_slots: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReserveSlotRequest {
    #[validate(
        length(min = 1, max = MAX_STARTUP_ID_LENGTH),
        custom(function = "validate_startup_id")
    )]
    pub startup_id: String,
}

fn validate_week_dates(request: &NewLaunchWeekRequest) -> Result<(), ValidationError> {
    if request.end_date < request.start_date {
        let mut err = ValidationError::new("end_before_start");
        err.message = Some(Cow::Borrowed("End date must not be before start date"));
        return Err(err);
    }
    Ok(())
}

pub fn validate_startup_id(id: &str) -> Result<(), ValidationError> {
    if id.trim() != id || id.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("startup_id_whitespace");
        err.message = Some(Cow::Borrowed("Startup id must not contain whitespace"));
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(startups: &[&str], max_slots: i32) -> LaunchWeek {
        LaunchWeek {
            id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            startups: startups.iter().map(|s| s.to_string()).collect(),
            max_slots,
        }
    }

    #[test]
    fn remaining_slots_never_negative() {
        assert_eq!(week(&["a"], 3).remaining_slots(), 2);
        assert!(week(&["a", "b"], 2).is_full());
        assert_eq!(week(&["a", "b", "c"], 2).remaining_slots(), 0);
    }

    #[test]
    fn active_window_is_inclusive() {
        let w = week(&[], 1);
        assert!(w.is_active_on(w.start_date));
        assert!(w.is_active_on(w.end_date));
        assert!(!w.is_active_on(w.end_date.succ_opt().unwrap()));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let request = NewLaunchWeekRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            max_slots: 5,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn zero_slots_is_rejected() {
        let request = NewLaunchWeekRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            max_slots: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn startup_id_with_spaces_is_rejected() {
        let request = ReserveSlotRequest { startup_id: "acme inc".into() };
        assert!(request.validate().is_err());
    }
}
