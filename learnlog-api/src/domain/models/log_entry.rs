use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::{Date, OffsetDateTime};

use super::{LogId, ProfileSummary, UserId};
use crate::domain::LogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    Book,
    Podcast,
    Article,
    Course,
    Video,
    Other,
}

/// A stored learning log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: LogId,
    pub user_id: UserId,
    pub content_type: ContentType,
    pub title: String,
    pub creator: Option<String>,
    pub consumed_date: Date,
    pub key_points: String,
    pub practical_application: String,
    pub summary: String,
    pub is_shared: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
    /// Present on feed entries, where the reader is not the author.
    pub author: Option<ProfileSummary>,
}

/// Every log of one user, as handed out for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogExport {
    pub exported_at: OffsetDateTime,
    pub logs: Vec<LogEntry>,
}

/// A validated request to create a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub content_type: ContentType,
    pub title: String,
    pub creator: Option<String>,
    pub consumed_date: Date,
    pub key_points: String,
    pub practical_application: String,
    pub summary: String,
    pub is_shared: bool,
}

impl NewLogEntry {
    /// Trims every text field and rejects blank required ones. A blank
    /// creator is stored as absent.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content_type: ContentType,
        title: &str,
        creator: Option<&str>,
        consumed_date: Date,
        key_points: &str,
        practical_application: &str,
        summary: &str,
        is_shared: bool,
    ) -> Result<Self, LogError> {
        Ok(Self {
            content_type,
            title: required("title", title)?,
            creator: creator
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            consumed_date,
            key_points: required("key points", key_points)?,
            practical_application: required("practical application", practical_application)?,
            summary: required("summary", summary)?,
            is_shared,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, LogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LogError::Invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
