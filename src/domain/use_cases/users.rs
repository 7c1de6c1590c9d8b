use std::sync::Arc;

use crate::{
    entities::{
        session::{Role, Session},
        user::{User, UserInsert},
    },
    errors::AppError,
    repositories::user::UserRepository,
};

pub struct UserHandler {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        UserHandler { user_repo }
    }

    /// Records the session's user and returns the session as the store sees it.
    ///
    /// A first sighting inserts the user as `REGULAR`; afterwards the stored
    /// role wins over whatever the token claims.
    pub async fn sync_session(&self, session: &Session) -> Result<Session, AppError> {
        let mut insert = UserInsert::from(session);
        insert.role = Role::Regular;

        let user = self.user_repo.upsert_user(&insert).await?;
        if user.role != session.role {
            tracing::info!(user = %user.id, role = %user.role, "Session role refreshed from store");
        }

        Ok(user.to_session())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_users().await
    }

    pub async fn update_role(&self, actor: &Session, id: &str, role: Role) -> Result<User, AppError> {
        if actor.id == id && role != Role::Admin {
            return Err(AppError::InvalidInput("Admins cannot demote themselves".into()));
        }

        let user = self.user_repo.update_role(id, role).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("User not found".into()),
            _ => e,
        })?;

        tracing::info!(actor = %actor.id, user = %user.id, role = %user.role, "User role updated");
        Ok(user)
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.user_repo.count_users().await
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.user_repo.check_connection().await
    }
}
