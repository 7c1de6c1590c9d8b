use std::borrow::Cow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    entities::option_fields::OptionField,
    utils::markdown::safe_markdown_to_html,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MIN_SLUG_LENGTH: u64 = 3;
const MAX_SLUG_LENGTH: u64 = 80;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct BlogPostRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Validate)]
pub struct BlogPostInsert {
    pub id: Uuid,

    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(custom(function = "validate_url"))]
    pub external_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved column values written by an update.
#[derive(Debug)]
pub struct BlogPostChanges {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub external_url: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetail {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content_html: String,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostCreatedResponse {
    pub id: Uuid,
    pub slug: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPage {
    pub posts: Vec<BlogPostSummary>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPostRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,

    pub content: String,

    #[validate(custom(function = "validate_url"))]
    pub external_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: OptionField<String>,

    #[validate(custom(function = "validate_optional_content"))]
    pub content: OptionField<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub external_url: OptionField<String>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().len() != title.len() {
        return Err(new_validation_error("title_whitespace", "Title must not have leading or trailing whitespace"));
    }
    Ok(())
}

fn validate_length(value: &str, min: u64, max: u64) -> Result<(), ValidationError> {
    let len = value.chars().count() as u64;
    if len < min || len > max {
        return Err(new_validation_error("length", "Length is out of the allowed range"));
    }
    Ok(())
}

pub fn validate_optional_title(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(title) => {
            validate_length(title, MIN_TITLE_LENGTH, MAX_TITLE_LENGTH)?;
            validate_title(title)
        }
        OptionField::SetToNull => Err(new_validation_error("title_null", "Title cannot be removed")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_slug(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(slug) = value {
        // An empty slug asks for regeneration from the title
        if slug.is_empty() {
            return Ok(());
        }
        validate_length(slug, MIN_SLUG_LENGTH, MAX_SLUG_LENGTH)?;
        validate_slug(slug)?;
    }
    Ok(())
}

pub fn validate_optional_content(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(content) if content.trim().is_empty() => {
            Err(new_validation_error("content_empty", "Content cannot be empty"))
        }
        OptionField::SetToNull => Err(new_validation_error("content_null", "Content cannot be removed")),
        _ => Ok(()),
    }
}

pub fn validate_optional_url(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_url(url)?;
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

fn slug_from_title(title: &str) -> Result<String, ValidationErrors> {
    let generated = slug::slugify(title);
    if generated.len() < MIN_SLUG_LENGTH as usize {
        let mut errors = ValidationErrors::new();
        errors.add("slug", new_validation_error("slug_too_short", "Generated slug is too short; please provide a custom slug"));
        return Err(errors);
    }
    Ok(generated)
}

// ───── Conversions ──────────────────────────────────────────────────

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        BlogPost {
            id: row.id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            external_url: row.external_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<NewBlogPostRequest> for BlogPostInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewBlogPostRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        // Generate slug if not provided
        let slug = match value.slug {
            Some(s) => s,
            None => slug_from_title(&value.title)?,
        };

        let now = Utc::now();
        let insert = BlogPostInsert {
            id: Uuid::new_v4(),
            title: value.title,
            slug,
            content: value.content,
            external_url: value.external_url,
            created_at: now,
            updated_at: now,
        };

        insert.validate()?;
        Ok(insert)
    }
}

impl UpdateBlogPostRequest {
    /// Merges the patch onto the stored post.
    ///
    /// A new title without an explicit slug (or with an empty one)
    /// regenerates the slug from that title.
    pub fn resolve(self, current: &BlogPost) -> Result<BlogPostChanges, ValidationErrors> {
        let slug = match (&self.slug, &self.title) {
            (OptionField::SetToValue(s), _) if !s.trim().is_empty() => s.clone(),
            (_, OptionField::SetToValue(new_title)) => slug_from_title(new_title)?,
            _ => current.slug.clone(),
        };

        let title = self.title.value_ref().cloned().unwrap_or_else(|| current.title.clone());
        let content = self.content.value_ref().cloned().unwrap_or_else(|| current.content.clone());

        Ok(BlogPostChanges {
            title,
            slug,
            content,
            external_url: self.external_url.apply_to(current.external_url.clone()),
        })
    }
}

impl BlogPost {
    pub fn to_summary(&self) -> BlogPostSummary {
        BlogPostSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            external_url: self.external_url.clone(),
            created_at: self.created_at,
        }
    }

    pub fn to_detail(&self) -> BlogPostDetail {
        BlogPostDetail {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            content_html: safe_markdown_to_html(&self.content),
            external_url: self.external_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, slug: Option<&str>) -> NewBlogPostRequest {
        NewBlogPostRequest {
            title: title.to_string(),
            slug: slug.map(str::to_string),
            content: "# Hello\n\nFirst launch recap.".to_string(),
            external_url: Some("https://notion.so/launch-recap".to_string()),
        }
    }

    fn stored_post() -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: "Old title".into(),
            slug: "old-title".into(),
            content: "old".into(),
            external_url: Some("https://example.com/old".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn slug_is_generated_from_title() {
        let insert = BlogPostInsert::try_from(request("Our First Launch Week", None)).unwrap();
        assert_eq!(insert.slug, "our-first-launch-week");
    }

    #[test]
    fn invalid_slug_is_rejected() {
        let errors = BlogPostInsert::try_from(request("Valid title", Some("Bad--Slug"))).unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn non_http_external_url_is_rejected() {
        let mut req = request("Valid title", None);
        req.external_url = Some("ftp://files.test/post".into());

        let errors = BlogPostInsert::try_from(req).unwrap_err();
        assert!(errors.field_errors().contains_key("external_url"));
    }

    #[test]
    fn new_title_regenerates_slug() {
        let patch = UpdateBlogPostRequest {
            title: OptionField::SetToValue("Brand New Title".into()),
            ..Default::default()
        };

        let changes = patch.resolve(&stored_post()).unwrap();
        assert_eq!(changes.title, "Brand New Title");
        assert_eq!(changes.slug, "brand-new-title");
        assert_eq!(changes.content, "old");
    }

    #[test]
    fn explicit_slug_wins_and_null_clears_url() {
        let patch = UpdateBlogPostRequest {
            title: OptionField::SetToValue("Brand New Title".into()),
            slug: OptionField::SetToValue("custom-slug".into()),
            external_url: OptionField::SetToNull,
            ..Default::default()
        };

        let changes = patch.resolve(&stored_post()).unwrap();
        assert_eq!(changes.slug, "custom-slug");
        assert_eq!(changes.external_url, None);
    }

    #[test]
    fn title_without_slug_characters_keeps_post_reachable() {
        let patch = UpdateBlogPostRequest {
            title: OptionField::SetToValue("!!!".into()),
            ..Default::default()
        };

        assert!(patch.validate().is_ok());
        let errors = patch.resolve(&stored_post()).unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn removing_title_is_a_validation_error() {
        let patch = UpdateBlogPostRequest {
            title: OptionField::SetToNull,
            ..Default::default()
        };

        assert!(patch.validate().is_err());
    }
}
