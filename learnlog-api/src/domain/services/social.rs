use std::{collections::HashMap, slice, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::{
    models::{
        AuthContext, Comment, Connections, LikeState, LogId, LogRef, Notification,
        NotificationKind, Profile, ProfileStats, UserId, UserProfile,
    },
    ports::{
        inbound::SocialService,
        outbound::{LogStore, SocialStore},
    },
    SocialError,
};

/// Longest comment accepted, in characters.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Most profiles a single user search returns.
pub const USER_SEARCH_LIMIT: usize = 20;

/// Implementation of the SocialService inbound port.
pub struct SocialServiceImpl<S, L> {
    store: Arc<S>,
    logs: Arc<L>,
    notification_limit: usize,
}

impl<S, L> SocialServiceImpl<S, L> {
    /// `notification_limit` caps each notification source separately.
    pub fn new(store: Arc<S>, logs: Arc<L>, notification_limit: usize) -> Self {
        Self {
            store,
            logs,
            notification_limit,
        }
    }
}

fn require_user(auth: &AuthContext) -> Result<&UserId, SocialError> {
    auth.user_id().ok_or(SocialError::NotAuthenticated)
}

impl<S: SocialStore, L: LogStore> SocialServiceImpl<S, L> {
    async fn current_like_state(
        &self,
        user_id: Option<&UserId>,
        log_id: &LogId,
    ) -> Result<LikeState, SocialError> {
        let count = self.store.like_count(log_id).await?;
        let liked = match user_id {
            Some(user_id) => self.store.has_liked(user_id, log_id).await?,
            None => false,
        };
        Ok(LikeState { liked, count })
    }

    async fn find_by_username(&self, username: &str) -> Result<Profile, SocialError> {
        let username = username.trim();
        self.store
            .profile_by_username(username)
            .await?
            .ok_or_else(|| SocialError::UserNotFound(username.to_string()))
    }

    async fn sorted_profiles(&self, ids: &[UserId]) -> Result<Vec<Profile>, SocialError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut profiles = self.store.profiles(ids).await?;
        profiles.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(profiles)
    }

    async fn profile_page(
        &self,
        auth: &AuthContext,
        profile: Profile,
    ) -> Result<UserProfile, SocialError> {
        let id = &profile.id;
        let viewer = auth.user_id();
        let is_owner = viewer == Some(id);

        let (followers, following, shared_logs, is_following) = futures::try_join!(
            self.store.follower_count(id),
            self.store.following_count(id),
            async {
                self.logs
                    .list_shared_logs(slice::from_ref(id))
                    .await
                    .map_err(SocialError::from)
            },
            async {
                match viewer {
                    Some(me) if !is_owner => self.store.follow_exists(me, id).await,
                    _ => Ok(false),
                }
            },
        )?;

        let logs = if is_owner {
            self.logs.log_count(id).await?
        } else {
            shared_logs.len() as u64
        };

        Ok(UserProfile {
            stats: ProfileStats {
                followers,
                following,
                logs,
            },
            profile,
            shared_logs,
            is_following,
        })
    }
}

#[async_trait]
impl<S: SocialStore, L: LogStore> SocialService for SocialServiceImpl<S, L> {
    async fn search_users(&self, query: &str) -> Result<Vec<Profile>, SocialError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.store.search_profiles(query, USER_SEARCH_LIMIT).await
    }

    async fn user_profile(
        &self,
        auth: &AuthContext,
        username: &str,
    ) -> Result<UserProfile, SocialError> {
        let profile = self.find_by_username(username).await?;
        self.profile_page(auth, profile).await
    }

    async fn my_profile(&self, auth: &AuthContext) -> Result<UserProfile, SocialError> {
        let me = require_user(auth)?;
        let profile = self
            .store
            .profiles(slice::from_ref(me))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SocialError::UserNotFound(me.to_string()))?;

        self.profile_page(auth, profile).await
    }

    async fn connections(&self, username: &str) -> Result<Connections, SocialError> {
        let profile = self.find_by_username(username).await?;
        let (follower_ids, following_ids) = futures::try_join!(
            self.store.follower_ids(&profile.id),
            self.store.following_ids(&profile.id),
        )?;

        let (followers, following) = futures::try_join!(
            self.sorted_profiles(&follower_ids),
            self.sorted_profiles(&following_ids),
        )?;

        Ok(Connections {
            followers,
            following,
        })
    }

    async fn follow(&self, auth: &AuthContext, user_id: &UserId) -> Result<(), SocialError> {
        let me = require_user(auth)?;
        if me == user_id {
            return Err(SocialError::CannotFollowSelf);
        }

        if self.store.follow_exists(me, user_id).await? {
            return Ok(());
        }

        self.store.insert_follow(me, user_id).await?;
        tracing::info!(follower = %me, following = %user_id, "followed user");
        Ok(())
    }

    async fn unfollow(&self, auth: &AuthContext, user_id: &UserId) -> Result<(), SocialError> {
        let me = require_user(auth)?;
        if self.store.delete_follow(me, user_id).await? {
            tracing::info!(follower = %me, following = %user_id, "unfollowed user");
        }
        Ok(())
    }

    async fn is_following(
        &self,
        auth: &AuthContext,
        user_id: &UserId,
    ) -> Result<bool, SocialError> {
        match auth.user_id() {
            Some(me) => self.store.follow_exists(me, user_id).await,
            None => Ok(false),
        }
    }

    async fn following(&self, auth: &AuthContext) -> Result<Vec<Profile>, SocialError> {
        let ids = self.store.following_ids(require_user(auth)?).await?;
        self.sorted_profiles(&ids).await
    }

    async fn like_state(
        &self,
        auth: &AuthContext,
        log_id: &LogId,
    ) -> Result<LikeState, SocialError> {
        self.current_like_state(auth.user_id(), log_id).await
    }

    async fn toggle_like(
        &self,
        auth: &AuthContext,
        log_id: &LogId,
    ) -> Result<LikeState, SocialError> {
        let me = require_user(auth)?;

        if self.store.has_liked(me, log_id).await? {
            self.store.delete_like(me, log_id).await?;
        } else {
            self.store.insert_like(me, log_id).await?;
        }

        self.current_like_state(Some(me), log_id).await
    }

    async fn comments(&self, log_id: &LogId) -> Result<Vec<Comment>, SocialError> {
        self.store.comments_for(log_id).await
    }

    async fn add_comment(
        &self,
        auth: &AuthContext,
        log_id: &LogId,
        content: &str,
    ) -> Result<Comment, SocialError> {
        let me = require_user(auth)?;
        let content = content.trim();

        if content.is_empty() {
            return Err(SocialError::InvalidComment("comment is empty".to_string()));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(SocialError::InvalidComment(format!(
                "comment is longer than {MAX_COMMENT_LENGTH} characters"
            )));
        }

        self.store.insert_comment(me, log_id, content).await
    }

    async fn delete_comment(
        &self,
        auth: &AuthContext,
        log_id: &LogId,
        comment_id: &str,
    ) -> Result<(), SocialError> {
        let me = require_user(auth)?;
        if !self.store.delete_comment(me, log_id, comment_id).await? {
            return Err(SocialError::CommentNotFound(comment_id.to_string()));
        }

        tracing::info!(user_id = %me, log_id = %log_id, comment_id, "deleted comment");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn notifications(&self, auth: &AuthContext) -> Result<Vec<Notification>, SocialError> {
        let me = require_user(auth)?;
        let limit = self.notification_limit;

        let logs: HashMap<LogId, LogRef> = self
            .store
            .shared_log_refs(me)
            .await?
            .into_iter()
            .map(|log| (log.id.clone(), log))
            .collect();
        let log_ids = logs.keys().cloned().collect::<Vec<_>>();

        let (followers, likes, comments) = futures::try_join!(
            self.store.recent_followers(me, limit),
            async {
                if log_ids.is_empty() {
                    return Ok(Vec::new());
                }
                self.store.recent_likes(&log_ids, me, limit).await
            },
            async {
                if log_ids.is_empty() {
                    return Ok(Vec::new());
                }
                self.store.recent_comments(&log_ids, me, limit).await
            },
        )?;

        let actor_ids = followers
            .iter()
            .map(|f| f.follower_id.clone())
            .chain(likes.iter().map(|l| l.user_id.clone()))
            .chain(comments.iter().map(|c| c.user_id.clone()))
            .unique()
            .collect::<Vec<_>>();

        if actor_ids.is_empty() {
            return Ok(Vec::new());
        }

        let profiles: HashMap<UserId, Profile> = self
            .store
            .profiles(&actor_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let follow_notifications = followers.into_iter().filter_map(|follow| {
            Some(Notification {
                id: format!(
                    "follow-{}-{}",
                    follow.follower_id,
                    follow.created_at.unix_timestamp()
                ),
                kind: NotificationKind::Follow,
                created_at: follow.created_at,
                actor: profiles.get(&follow.follower_id)?.clone(),
                log: None,
                comment_content: None,
            })
        });

        let like_notifications = likes.into_iter().filter_map(|like| {
            Some(Notification {
                id: format!("like-{}", like.id),
                kind: NotificationKind::Like,
                created_at: like.created_at,
                actor: profiles.get(&like.user_id)?.clone(),
                log: Some(logs.get(&like.log_id)?.clone()),
                comment_content: None,
            })
        });

        let comment_notifications = comments.into_iter().filter_map(|comment| {
            Some(Notification {
                id: format!("comment-{}", comment.id),
                kind: NotificationKind::Comment,
                created_at: comment.created_at,
                actor: profiles.get(&comment.user_id)?.clone(),
                log: Some(logs.get(&comment.log_id)?.clone()),
                comment_content: Some(comment.content),
            })
        });

        Ok(follow_notifications
            .chain(like_notifications)
            .chain(comment_notifications)
            .sorted_by(|a, b| b.created_at.cmp(&a.created_at))
            .collect())
    }
}
