use time::OffsetDateTime;

use super::{LogEntry, LogId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Profile fields shown next to someone else's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: String,
    pub user_id: UserId,
    pub log_id: LogId,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub log_id: LogId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub author: Option<ProfileSummary>,
}

/// `id, title` of a log, used to label notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRef {
    pub id: LogId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub followers: u64,
    pub following: u64,
    /// All of the owner's logs when they view themselves, shared logs otherwise.
    pub logs: u64,
}

/// A profile page: who the user is, their numbers and their shared logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub profile: Profile,
    pub stats: ProfileStats,
    pub shared_logs: Vec<LogEntry>,
    /// Whether the viewer follows this user. False for the owner and for
    /// anonymous viewers.
    pub is_following: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections {
    pub followers: Vec<Profile>,
    pub following: Vec<Profile>,
}
