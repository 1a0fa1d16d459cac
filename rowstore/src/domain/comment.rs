use serde::{Deserialize, Serialize};

use super::ProfileSummaryRow;

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRow {
    pub id: String,
    pub user_id: String,
    pub log_id: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub profiles: Option<ProfileSummaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCommentRow {
    pub log_id: String,
    pub user_id: String,
    pub content: String,
}
