use serde::{Deserialize, Serialize};

use super::ProfileSummaryRow;

/// A row of the `logs` table.
///
/// Timestamps are kept as the raw strings the store returns; callers decide
/// how strictly to parse them.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRow {
    pub id: String,
    pub user_id: String,
    pub content_type: String,
    pub title: String,
    pub creator: Option<String>,
    pub consumed_date: String,
    pub key_points: String,
    pub practical_application: String,
    pub summary: String,
    pub is_shared: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    /// Author profile, present when the query embeds `profiles:user_id(...)`.
    #[serde(default)]
    pub profiles: Option<ProfileSummaryRow>,
}

/// The slice of a log row that records user activity.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRow {
    pub id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// `id, title` projection used when resolving notification targets.
#[derive(Debug, Clone, Deserialize)]
pub struct LogTitleRow {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLogRow {
    pub user_id: String,
    pub content_type: String,
    pub title: String,
    pub creator: Option<String>,
    pub consumed_date: String,
    pub key_points: String,
    pub practical_application: String,
    pub summary: String,
    pub is_shared: bool,
}
