use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    entities::directory::{Directory, DirectoryType, SubmissionDifficulty},
    errors::AppError,
    repositories::directory::DirectoryRepository,
    utils::valid_uuid::valid_uuid,
};

/// Filters accepted by the directories page.
#[derive(Debug, Default, Clone)]
pub struct DirectoryFilter {
    pub tag: Option<String>,
    pub difficulty: Option<SubmissionDifficulty>,
}

pub struct DirectoryHandler {
    pub directory_repo: Arc<dyn DirectoryRepository>,
}

impl DirectoryHandler {
    pub fn new(directory_repo: Arc<dyn DirectoryRepository>) -> Self {
        DirectoryHandler { directory_repo }
    }

    pub async fn list_directories(&self) -> Result<Vec<Directory>, AppError> {
        self.directory_repo.list_directories().await
    }

    /// Displayable directories, highest domain rating first.
    ///
    /// Documents that do not map onto a [`DirectoryType`] are skipped.
    pub async fn directory_cards(&self, filter: &DirectoryFilter) -> Result<Vec<DirectoryType>, AppError> {
        let directories = self.directory_repo.list_directories().await?;

        let mut cards: Vec<DirectoryType> = directories
            .iter()
            .filter_map(|d| match DirectoryType::try_from(d) {
                Ok(card) => Some(card),
                Err(e) => {
                    tracing::debug!(id = %d.id, "Skipping directory document: {}", e);
                    None
                }
            })
            .filter(|card| filter.tag.as_deref().is_none_or(|tag| card.has_tag(tag)))
            .filter(|card| filter.difficulty.is_none_or(|d| card.submission_difficulty == Some(d)))
            .collect();

        cards.sort_by(|a, b| {
            b.domain_rating
                .unwrap_or(0)
                .cmp(&a.domain_rating.unwrap_or(0))
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(cards)
    }

    pub async fn create_directory(&self, document: Map<String, Value>) -> Result<Uuid, AppError> {
        if document.is_empty() {
            return Err(AppError::InvalidInput("Directory document cannot be empty".into()));
        }
        if document.contains_key("id") {
            return Err(AppError::InvalidInput("Directory document must not set `id`".into()));
        }

        let id = self.directory_repo.create_directory(Uuid::new_v4(), &document).await?;
        tracing::info!(%id, "Directory created");
        Ok(id)
    }

    pub async fn delete_directory(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.directory_repo.delete_directory(&valid_id).await
    }

    pub async fn count_directories(&self) -> Result<i64, AppError> {
        self.directory_repo.count_directories().await
    }
}
