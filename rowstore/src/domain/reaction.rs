use serde::{Deserialize, Serialize};

/// The only reaction type the application writes.
pub const LIKE_REACTION: &str = "like";

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRow {
    pub id: String,
    pub user_id: String,
    pub log_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReactionRow {
    pub log_id: String,
    pub user_id: String,
    pub reaction_type: String,
}
