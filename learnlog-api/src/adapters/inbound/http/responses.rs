//! HTTP response types.
//!
//! These types serialize to the JSON format expected by the frontend.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::domain::models::{
    Comment, Connections, ContentType, ImportSummary, LikeState, LogEntry, LogExport, LogRef,
    Notification, NotificationKind, Profile, ProfileSummary, Streak, StreakStatus, UserProfile,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub count: u32,
    pub status: StreakStatus,
    /// Most recent activity (ISO 8601), absent when there is none.
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_activity: Option<OffsetDateTime>,
}

impl From<Streak> for StreakResponse {
    fn from(streak: Streak) -> Self {
        Self {
            count: streak.count,
            status: streak.status,
            last_activity: streak.last_activity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<ProfileSummary> for AuthorResponse {
    fn from(profile: ProfileSummary) -> Self {
        Self {
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    pub id: String,
    pub user_id: String,
    pub content_type: ContentType,
    pub title: String,
    pub creator: Option<String>,
    pub consumed_date: Date,
    pub key_points: String,
    pub practical_application: String,
    pub summary: String,
    pub is_shared: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
}

impl From<LogEntry> for LogResponse {
    fn from(log: LogEntry) -> Self {
        Self {
            id: log.id.to_string(),
            user_id: log.user_id.to_string(),
            content_type: log.content_type,
            title: log.title,
            creator: log.creator,
            consumed_date: log.consumed_date,
            key_points: log.key_points,
            practical_application: log.practical_application,
            summary: log.summary,
            is_shared: log.is_shared,
            created_at: log.created_at,
            updated_at: log.updated_at,
            author: log.author.map(AuthorResponse::from),
        }
    }
}

/// Download of every log the caller owns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogExportResponse {
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
    pub logs: Vec<LogResponse>,
}

impl From<LogExport> for LogExportResponse {
    fn from(export: LogExport) -> Self {
        Self {
            exported_at: export.exported_at,
            logs: export.logs.into_iter().map(LogResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub followers: u64,
    pub following: u64,
    pub log_count: u64,
    pub is_following: bool,
    pub shared_logs: Vec<LogResponse>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(page: UserProfile) -> Self {
        Self {
            profile: page.profile.into(),
            followers: page.stats.followers,
            following: page.stats.following,
            log_count: page.stats.logs,
            is_following: page.is_following,
            shared_logs: page.shared_logs.into_iter().map(LogResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsResponse {
    pub followers: Vec<ProfileResponse>,
    pub following: Vec<ProfileResponse>,
}

impl From<Connections> for ConnectionsResponse {
    fn from(connections: Connections) -> Self {
        Self {
            followers: connections
                .followers
                .into_iter()
                .map(ProfileResponse::from)
                .collect(),
            following: connections
                .following
                .into_iter()
                .map(ProfileResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStateResponse {
    pub liked: bool,
    pub count: u64,
}

impl From<LikeState> for LikeStateResponse {
    fn from(state: LikeState) -> Self {
        Self {
            liked: state.liked,
            count: state.count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub log_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author: Option<AuthorResponse>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            log_id: comment.log_id.to_string(),
            user_id: comment.user_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
            author: comment.author.map(AuthorResponse::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRefResponse {
    pub id: String,
    pub title: String,
}

impl From<LogRef> for LogRefResponse {
    fn from(log: LogRef) -> Self {
        Self {
            id: log.id.to_string(),
            title: log.title,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Human readable line, e.g. `liked your log "Deep Work"`.
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub actor: ProfileResponse,
    pub log: Option<LogRefResponse>,
    pub comment_content: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            message: notification.describe(),
            id: notification.id,
            kind: notification.kind,
            created_at: notification.created_at,
            actor: notification.actor.into(),
            log: notification.log.map(LogRefResponse::from),
            comment_content: notification.comment_content,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    pub following: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummaryResponse {
    pub imported: usize,
    pub failed: usize,
}

impl From<ImportSummary> for ImportSummaryResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            imported: summary.imported,
            failed: summary.failed,
        }
    }
}
