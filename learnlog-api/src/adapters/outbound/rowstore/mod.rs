mod conversions;

use async_trait::async_trait;
use itertools::Itertools;
use rowstore::{tables, RowQuery, RowStoreClient, RowStoreError, LIKE_REACTION};

use crate::domain::{
    models::{
        ActivityRecord, Comment, Follow, Like, LogEntry, LogId, LogRef, NewLogEntry, Profile,
        UserId,
    },
    ports::outbound::{ActivityReader, IdentityProvider, LogStore, SocialStore},
    AuthError, LogError, SocialError, StreakError,
};

use self::conversions::{
    to_activity_record, to_comment, to_follow, to_like, to_log_entry, to_log_ref,
    to_new_log_row, to_profile,
};

const LOG_COLUMNS: &str = "id,user_id,content_type,title,creator,consumed_date,key_points,\
    practical_application,summary,is_shared,created_at,updated_at";
const AUTHOR_EMBED: &str = "profiles:user_id(username,full_name,avatar_url)";
const REACTION_COLUMNS: &str = "id,user_id,log_id,created_at";
const COMMENT_COLUMNS: &str = "id,user_id,log_id,content,created_at";
const PROFILE_COLUMNS: &str = "id,username,full_name,avatar_url";

/// Adapter that implements every outbound port on top of the row store.
///
/// Holds a client already scoped to the caller's credentials, so row-level
/// security in the store decides what each query may see.
pub struct RowStoreAdapter {
    client: RowStoreClient,
}

impl RowStoreAdapter {
    pub fn new(client: RowStoreClient) -> Self {
        Self { client }
    }
}

fn map_log_error(err: RowStoreError) -> LogError {
    match err {
        RowStoreError::Unauthorized => LogError::NotAuthenticated,
        other => LogError::store(other.to_string()),
    }
}

fn map_social_error(err: RowStoreError) -> SocialError {
    match err {
        RowStoreError::Unauthorized => SocialError::NotAuthenticated,
        other => SocialError::store(other.to_string()),
    }
}

fn with_author(columns: &str) -> String {
    format!("{columns},{AUTHOR_EMBED}")
}

#[async_trait]
impl ActivityReader for RowStoreAdapter {
    async fn fetch_activity_records(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ActivityRecord>, StreakError> {
        let query = RowQuery::new()
            .select("id,created_at,updated_at")
            .eq("user_id", user_id)
            .order_desc("created_at");

        let rows: Vec<rowstore::ActivityRow> = self
            .client
            .select(tables::LOGS, &query)
            .await
            .map_err(|e| StreakError::ActivityRead(e.to_string()))?;

        rows.into_iter().map(to_activity_record).collect()
    }
}

#[async_trait]
impl IdentityProvider for RowStoreAdapter {
    async fn resolve(&self, access_token: &str) -> Result<Option<UserId>, AuthError> {
        let credentials = self.client.credentials().clone().with_access_token(access_token);

        match self.client.with_credentials(credentials).fetch_user().await {
            Ok(user) => Ok(Some(UserId::new(user.id))),
            Err(RowStoreError::Unauthorized) => Ok(None),
            Err(e) => {
                tracing::error!("failed to resolve access token: {:?}", e);
                Err(AuthError::Unavailable(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl LogStore for RowStoreAdapter {
    async fn insert_log(
        &self,
        user_id: &UserId,
        entry: &NewLogEntry,
    ) -> Result<LogEntry, LogError> {
        let row: rowstore::LogRow = self
            .client
            .insert(tables::LOGS, &to_new_log_row(user_id, entry))
            .await
            .map_err(map_log_error)?;

        to_log_entry(row).map_err(LogError::Store)
    }

    async fn list_logs(&self, user_id: &UserId) -> Result<Vec<LogEntry>, LogError> {
        let query = RowQuery::new()
            .select(LOG_COLUMNS)
            .eq("user_id", user_id)
            .order_desc("created_at");

        let rows: Vec<rowstore::LogRow> = self
            .client
            .select(tables::LOGS, &query)
            .await
            .map_err(map_log_error)?;

        rows.into_iter()
            .map(to_log_entry)
            .collect::<Result<_, _>>()
            .map_err(LogError::Store)
    }

    async fn log_count(&self, user_id: &UserId) -> Result<u64, LogError> {
        self.client
            .count(tables::LOGS, &RowQuery::new().eq("user_id", user_id))
            .await
            .map_err(map_log_error)
    }

    async fn list_shared_logs(&self, authors: &[UserId]) -> Result<Vec<LogEntry>, LogError> {
        let query = RowQuery::new()
            .select(with_author(LOG_COLUMNS))
            .in_list("user_id", authors)
            .eq("is_shared", true)
            .order_desc("created_at");

        let rows: Vec<rowstore::LogRow> = self
            .client
            .select(tables::LOGS, &query)
            .await
            .map_err(map_log_error)?;

        rows.into_iter()
            .map(to_log_entry)
            .collect::<Result<_, _>>()
            .map_err(LogError::Store)
    }

    async fn delete_log(&self, user_id: &UserId, log_id: &LogId) -> Result<bool, LogError> {
        let query = RowQuery::new().eq("id", log_id).eq("user_id", user_id);

        let deleted = self
            .client
            .delete(tables::LOGS, &query)
            .await
            .map_err(map_log_error)?;

        Ok(deleted > 0)
    }
}

#[async_trait]
impl SocialStore for RowStoreAdapter {
    async fn insert_follow(&self, follower: &UserId, following: &UserId) -> Result<(), SocialError> {
        let row = rowstore::NewFollowRow {
            follower_id: follower.to_string(),
            following_id: following.to_string(),
        };

        let _: rowstore::FollowRow = self
            .client
            .insert(tables::FOLLOWS, &row)
            .await
            .map_err(map_social_error)?;

        Ok(())
    }

    async fn delete_follow(
        &self,
        follower: &UserId,
        following: &UserId,
    ) -> Result<bool, SocialError> {
        let query = RowQuery::new()
            .eq("follower_id", follower)
            .eq("following_id", following);

        let deleted = self
            .client
            .delete(tables::FOLLOWS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(deleted > 0)
    }

    async fn follow_exists(
        &self,
        follower: &UserId,
        following: &UserId,
    ) -> Result<bool, SocialError> {
        let query = RowQuery::new()
            .eq("follower_id", follower)
            .eq("following_id", following);

        let count = self
            .client
            .count(tables::FOLLOWS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(count > 0)
    }

    async fn following_ids(&self, follower: &UserId) -> Result<Vec<UserId>, SocialError> {
        let query = RowQuery::new()
            .select("follower_id,following_id,created_at")
            .eq("follower_id", follower);

        let rows: Vec<rowstore::FollowRow> = self
            .client
            .select(tables::FOLLOWS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(rows
            .into_iter()
            .map(|row| UserId::new(row.following_id))
            .collect())
    }

    async fn follower_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, SocialError> {
        let query = RowQuery::new()
            .select("follower_id,following_id,created_at")
            .eq("following_id", user_id);

        let rows: Vec<rowstore::FollowRow> = self
            .client
            .select(tables::FOLLOWS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(rows
            .into_iter()
            .map(|row| UserId::new(row.follower_id))
            .collect())
    }

    async fn follower_count(&self, user_id: &UserId) -> Result<u64, SocialError> {
        self.client
            .count(tables::FOLLOWS, &RowQuery::new().eq("following_id", user_id))
            .await
            .map_err(map_social_error)
    }

    async fn following_count(&self, user_id: &UserId) -> Result<u64, SocialError> {
        self.client
            .count(tables::FOLLOWS, &RowQuery::new().eq("follower_id", user_id))
            .await
            .map_err(map_social_error)
    }

    async fn recent_followers(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Follow>, SocialError> {
        let query = RowQuery::new()
            .select("follower_id,following_id,created_at")
            .eq("following_id", user_id)
            .order_desc("created_at")
            .limit(limit);

        let rows: Vec<rowstore::FollowRow> = self
            .client
            .select(tables::FOLLOWS, &query)
            .await
            .map_err(map_social_error)?;

        rows.into_iter()
            .map(to_follow)
            .collect::<Result<_, _>>()
            .map_err(SocialError::Store)
    }

    async fn profiles(&self, ids: &[UserId]) -> Result<Vec<Profile>, SocialError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = RowQuery::new()
            .select(PROFILE_COLUMNS)
            .in_list("id", ids.iter().unique());

        let rows: Vec<rowstore::ProfileRow> = self
            .client
            .select(tables::PROFILES, &query)
            .await
            .map_err(map_social_error)?;

        Ok(rows.into_iter().map(to_profile).collect())
    }

    async fn profile_by_username(&self, username: &str) -> Result<Option<Profile>, SocialError> {
        let query = RowQuery::new()
            .select(PROFILE_COLUMNS)
            .eq("username", username);

        let row: Option<rowstore::ProfileRow> = self
            .client
            .select_first(tables::PROFILES, &query)
            .await
            .map_err(map_social_error)?;

        Ok(row.map(to_profile))
    }

    async fn search_profiles(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, SocialError> {
        let query = RowQuery::new()
            .select(PROFILE_COLUMNS)
            .ilike("username", format!("*{fragment}*"))
            .order_asc("username")
            .limit(limit);

        let rows: Vec<rowstore::ProfileRow> = self
            .client
            .select(tables::PROFILES, &query)
            .await
            .map_err(map_social_error)?;

        Ok(rows.into_iter().map(to_profile).collect())
    }

    async fn like_count(&self, log_id: &LogId) -> Result<u64, SocialError> {
        let query = RowQuery::new()
            .eq("log_id", log_id)
            .eq("reaction_type", LIKE_REACTION);

        self.client
            .count(tables::REACTIONS, &query)
            .await
            .map_err(map_social_error)
    }

    async fn has_liked(&self, user_id: &UserId, log_id: &LogId) -> Result<bool, SocialError> {
        let query = RowQuery::new()
            .select(REACTION_COLUMNS)
            .eq("log_id", log_id)
            .eq("user_id", user_id)
            .eq("reaction_type", LIKE_REACTION);

        let row: Option<rowstore::ReactionRow> = self
            .client
            .select_first(tables::REACTIONS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(row.is_some())
    }

    async fn insert_like(&self, user_id: &UserId, log_id: &LogId) -> Result<(), SocialError> {
        let row = rowstore::NewReactionRow {
            log_id: log_id.to_string(),
            user_id: user_id.to_string(),
            reaction_type: LIKE_REACTION.to_string(),
        };

        let _: rowstore::ReactionRow = self
            .client
            .insert(tables::REACTIONS, &row)
            .await
            .map_err(map_social_error)?;

        Ok(())
    }

    async fn delete_like(&self, user_id: &UserId, log_id: &LogId) -> Result<(), SocialError> {
        let query = RowQuery::new()
            .eq("log_id", log_id)
            .eq("user_id", user_id)
            .eq("reaction_type", LIKE_REACTION);

        self.client
            .delete(tables::REACTIONS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(())
    }

    async fn recent_likes(
        &self,
        log_ids: &[LogId],
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<Like>, SocialError> {
        let query = RowQuery::new()
            .select(REACTION_COLUMNS)
            .in_list("log_id", log_ids)
            .eq("reaction_type", LIKE_REACTION)
            .neq("user_id", exclude)
            .order_desc("created_at")
            .limit(limit);

        let rows: Vec<rowstore::ReactionRow> = self
            .client
            .select(tables::REACTIONS, &query)
            .await
            .map_err(map_social_error)?;

        rows.into_iter()
            .map(to_like)
            .collect::<Result<_, _>>()
            .map_err(SocialError::Store)
    }

    async fn comments_for(&self, log_id: &LogId) -> Result<Vec<Comment>, SocialError> {
        let query = RowQuery::new()
            .select(with_author(COMMENT_COLUMNS))
            .eq("log_id", log_id)
            .order_asc("created_at");

        let rows: Vec<rowstore::CommentRow> = self
            .client
            .select(tables::COMMENTS, &query)
            .await
            .map_err(map_social_error)?;

        rows.into_iter()
            .map(to_comment)
            .collect::<Result<_, _>>()
            .map_err(SocialError::Store)
    }

    async fn insert_comment(
        &self,
        user_id: &UserId,
        log_id: &LogId,
        content: &str,
    ) -> Result<Comment, SocialError> {
        let row = rowstore::NewCommentRow {
            log_id: log_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
        };

        let inserted: rowstore::CommentRow = self
            .client
            .insert(tables::COMMENTS, &row)
            .await
            .map_err(map_social_error)?;

        to_comment(inserted).map_err(SocialError::Store)
    }

    async fn delete_comment(
        &self,
        user_id: &UserId,
        log_id: &LogId,
        comment_id: &str,
    ) -> Result<bool, SocialError> {
        let query = RowQuery::new()
            .eq("id", comment_id)
            .eq("log_id", log_id)
            .eq("user_id", user_id);

        let deleted = self
            .client
            .delete(tables::COMMENTS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(deleted > 0)
    }

    async fn recent_comments(
        &self,
        log_ids: &[LogId],
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<Comment>, SocialError> {
        let query = RowQuery::new()
            .select(COMMENT_COLUMNS)
            .in_list("log_id", log_ids)
            .neq("user_id", exclude)
            .order_desc("created_at")
            .limit(limit);

        let rows: Vec<rowstore::CommentRow> = self
            .client
            .select(tables::COMMENTS, &query)
            .await
            .map_err(map_social_error)?;

        rows.into_iter()
            .map(to_comment)
            .collect::<Result<_, _>>()
            .map_err(SocialError::Store)
    }

    async fn shared_log_refs(&self, user_id: &UserId) -> Result<Vec<LogRef>, SocialError> {
        let query = RowQuery::new()
            .select("id,title")
            .eq("user_id", user_id)
            .eq("is_shared", true);

        let rows: Vec<rowstore::LogTitleRow> = self
            .client
            .select(tables::LOGS, &query)
            .await
            .map_err(map_social_error)?;

        Ok(rows.into_iter().map(to_log_ref).collect())
    }
}
