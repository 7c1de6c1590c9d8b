use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::entities::blog_post::validate_url;

/// A directory listing as stored: an id plus a free-form JSON document.
///
/// Serialises flat, with `id` next to the document fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    pub id: Uuid,
    pub document: Map<String, Value>,
}

impl Serialize for Directory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut flat = self.document.clone();
        flat.insert("id".to_string(), Value::String(self.id.to_string()));
        flat.serialize(serializer)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct DirectoryRow {
    pub id: Uuid,
    pub document: sqlx::types::Json<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DirectoryRow> for Directory {
    fn from(row: DirectoryRow) -> Self {
        let document = match row.document.0 {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        Directory { id: row.id, document }
    }
}

/// How hard it is to get a listing accepted by a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubmissionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for SubmissionDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(SubmissionDifficulty::Easy),
            "medium" => Ok(SubmissionDifficulty::Medium),
            "hard" => Ok(SubmissionDifficulty::Hard),
            other => Err(format!("Unknown submission difficulty: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionDifficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for SubmissionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionDifficulty::Easy => "Easy",
            SubmissionDifficulty::Medium => "Medium",
            SubmissionDifficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

/// Display model of a directory, read out of its stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "dr")]
    pub domain_rating: Option<u32>,
    #[serde(default, alias = "views")]
    pub monthly_views: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "difficulty")]
    pub submission_difficulty: Option<SubmissionDifficulty>,
}

#[derive(Debug, Display)]
pub enum DirectoryCardError {
    #[display("Malformed directory document: {_0}")]
    Malformed(serde_json::Error),

    #[display("Directory link is not an http(s) URL: {_0}")]
    UnsafeUrl(String),
}

impl TryFrom<&Directory> for DirectoryType {
    type Error = DirectoryCardError;

    fn try_from(directory: &Directory) -> Result<Self, Self::Error> {
        let mut card: DirectoryType = serde_json::from_value(Value::Object(directory.document.clone()))
            .map_err(DirectoryCardError::Malformed)?;

        if validate_url(&card.url).is_err() {
            return Err(DirectoryCardError::UnsafeUrl(card.url));
        }

        // Rendered inside a style attribute
        if card.color.as_deref().is_some_and(|c| !is_hex_color(c)) {
            card.color = None;
        }

        Ok(card)
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

impl DirectoryType {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Serialize)]
pub struct DirectoryListResponse {
    pub directories: Vec<Directory>,
}

#[derive(Debug, Serialize)]
pub struct DirectoryCreatedResponse {
    pub id: Uuid,
}
