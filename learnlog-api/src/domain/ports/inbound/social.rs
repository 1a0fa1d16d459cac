use async_trait::async_trait;

use crate::domain::{
    models::{
        AuthContext, Comment, Connections, LikeState, LogId, Notification, Profile, UserId,
        UserProfile,
    },
    SocialError,
};

/// Inbound port for profiles, follows, likes, comments and notifications.
#[async_trait]
pub trait SocialService: Send + Sync + 'static {
    // ========================================================================
    // Profiles
    // ========================================================================

    /// Profiles whose username contains `query`. A blank query finds nobody.
    async fn search_users(&self, query: &str) -> Result<Vec<Profile>, SocialError>;

    async fn user_profile(&self, auth: &AuthContext, username: &str)
        -> Result<UserProfile, SocialError>;

    async fn my_profile(&self, auth: &AuthContext) -> Result<UserProfile, SocialError>;

    /// Who follows `username` and whom they follow, each sorted by username.
    async fn connections(&self, username: &str) -> Result<Connections, SocialError>;

    // ========================================================================
    // Follows
    // ========================================================================

    async fn follow(&self, auth: &AuthContext, user_id: &UserId) -> Result<(), SocialError>;

    async fn unfollow(&self, auth: &AuthContext, user_id: &UserId) -> Result<(), SocialError>;

    /// Whether the caller follows `user_id`. Always false for anonymous callers.
    async fn is_following(&self, auth: &AuthContext, user_id: &UserId)
        -> Result<bool, SocialError>;

    /// Profiles of everyone the caller follows.
    async fn following(&self, auth: &AuthContext) -> Result<Vec<Profile>, SocialError>;

    // ========================================================================
    // Likes & comments
    // ========================================================================

    async fn like_state(&self, auth: &AuthContext, log_id: &LogId)
        -> Result<LikeState, SocialError>;

    /// Like the log if the caller has not, otherwise remove the like.
    async fn toggle_like(&self, auth: &AuthContext, log_id: &LogId)
        -> Result<LikeState, SocialError>;

    async fn comments(&self, log_id: &LogId) -> Result<Vec<Comment>, SocialError>;

    async fn add_comment(
        &self,
        auth: &AuthContext,
        log_id: &LogId,
        content: &str,
    ) -> Result<Comment, SocialError>;

    /// Remove one of the caller's own comments.
    async fn delete_comment(
        &self,
        auth: &AuthContext,
        log_id: &LogId,
        comment_id: &str,
    ) -> Result<(), SocialError>;

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Follows, likes and comments directed at the caller, newest first.
    async fn notifications(&self, auth: &AuthContext) -> Result<Vec<Notification>, SocialError>;
}
