use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entities::session::{Role, Session}, errors::AppError};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage representation of a user; `role` is kept as text.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(AppError::InternalError)?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            image: row.image,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug)]
pub struct UserInsert {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Role,
}

impl From<&Session> for UserInsert {
    fn from(session: &Session) -> Self {
        UserInsert {
            id: session.id.clone(),
            name: session.name.clone(),
            email: session.email.clone(),
            image: session.image.clone(),
            role: session.role,
        }
    }
}

impl User {
    /// Session for this user, with the stored role taking precedence.
    pub fn to_session(&self) -> Session {
        Session {
            id: self.id.clone(),
            role: self.role,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
