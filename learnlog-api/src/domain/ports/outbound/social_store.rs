//! Social graph and interaction store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{Comment, Follow, Like, LogId, LogRef, Profile, UserId},
    SocialError,
};

#[async_trait]
pub trait SocialStore: Send + Sync + 'static {
    // ========================================================================
    // Follows
    // ========================================================================

    async fn insert_follow(&self, follower: &UserId, following: &UserId)
        -> Result<(), SocialError>;

    /// Returns whether a follow existed.
    async fn delete_follow(&self, follower: &UserId, following: &UserId)
        -> Result<bool, SocialError>;

    async fn follow_exists(&self, follower: &UserId, following: &UserId)
        -> Result<bool, SocialError>;

    /// Ids of the users `follower` follows.
    async fn following_ids(&self, follower: &UserId) -> Result<Vec<UserId>, SocialError>;

    /// Ids of the users following `user_id`.
    async fn follower_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, SocialError>;

    async fn follower_count(&self, user_id: &UserId) -> Result<u64, SocialError>;

    async fn following_count(&self, user_id: &UserId) -> Result<u64, SocialError>;

    /// The latest follows targeting `user_id`, newest first.
    async fn recent_followers(&self, user_id: &UserId, limit: usize)
        -> Result<Vec<Follow>, SocialError>;

    async fn profiles(&self, ids: &[UserId]) -> Result<Vec<Profile>, SocialError>;

    async fn profile_by_username(&self, username: &str) -> Result<Option<Profile>, SocialError>;

    /// Up to `limit` profiles whose username contains `fragment`, ignoring case.
    async fn search_profiles(&self, fragment: &str, limit: usize)
        -> Result<Vec<Profile>, SocialError>;

    // ========================================================================
    // Likes
    // ========================================================================

    async fn like_count(&self, log_id: &LogId) -> Result<u64, SocialError>;

    async fn has_liked(&self, user_id: &UserId, log_id: &LogId) -> Result<bool, SocialError>;

    async fn insert_like(&self, user_id: &UserId, log_id: &LogId) -> Result<(), SocialError>;

    async fn delete_like(&self, user_id: &UserId, log_id: &LogId) -> Result<(), SocialError>;

    /// The latest likes on any of `log_ids` not made by `exclude`, newest first.
    async fn recent_likes(
        &self,
        log_ids: &[LogId],
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<Like>, SocialError>;

    // ========================================================================
    // Comments
    // ========================================================================

    /// Comments on `log_id`, oldest first, with author profiles.
    async fn comments_for(&self, log_id: &LogId) -> Result<Vec<Comment>, SocialError>;

    async fn insert_comment(
        &self,
        user_id: &UserId,
        log_id: &LogId,
        content: &str,
    ) -> Result<Comment, SocialError>;

    /// Delete comment `comment_id` on `log_id` if `user_id` wrote it.
    /// Returns whether a row was removed.
    async fn delete_comment(
        &self,
        user_id: &UserId,
        log_id: &LogId,
        comment_id: &str,
    ) -> Result<bool, SocialError>;

    /// The latest comments on any of `log_ids` not written by `exclude`,
    /// newest first.
    async fn recent_comments(
        &self,
        log_ids: &[LogId],
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<Comment>, SocialError>;

    /// `id, title` of the shared logs owned by `user_id`.
    async fn shared_log_refs(&self, user_id: &UserId) -> Result<Vec<LogRef>, SocialError>;
}
