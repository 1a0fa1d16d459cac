use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct FollowRow {
    pub follower_id: String,
    pub following_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFollowRow {
    pub follower_id: String,
    pub following_id: String,
}
