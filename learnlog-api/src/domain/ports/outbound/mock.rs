//! In-memory implementation of the outbound ports for testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::{macros::datetime, OffsetDateTime};

use crate::domain::{
    models::{
        ActivityRecord, Comment, Follow, Like, LogEntry, LogId, LogRef, NewLogEntry, Profile,
        ProfileSummary, UserId,
    },
    ports::outbound::{ActivityReader, IdentityProvider, LogStore, SocialStore},
    AuthError, LogError, SocialError, StreakError,
};

/// Timestamp given to rows inserted through the ports.
pub const INSERTED_AT: OffsetDateTime = datetime!(2024-03-06 12:00 UTC);

#[derive(Default)]
struct State {
    activity: HashMap<UserId, Vec<ActivityRecord>>,
    logs: Vec<LogEntry>,
    profiles: Vec<Profile>,
    follows: Vec<Follow>,
    likes: Vec<Like>,
    comments: Vec<Comment>,
    tokens: HashMap<String, UserId>,
    rejected_titles: HashSet<String>,
    next_id: usize,
    unavailable: bool,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn summary(&self, user_id: &UserId) -> Option<ProfileSummary> {
        self.profiles
            .iter()
            .find(|p| &p.id == user_id)
            .map(|p| ProfileSummary {
                username: p.username.clone(),
                full_name: p.full_name.clone(),
                avatar_url: p.avatar_url.clone(),
            })
    }
}

/// Mock row store backed by in-memory collections.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<RwLock<State>>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activity(self, user_id: &UserId, records: Vec<ActivityRecord>) -> Self {
        self.state
            .write()
            .unwrap()
            .activity
            .entry(user_id.clone())
            .or_default()
            .extend(records);
        self
    }

    pub fn with_profile(self, id: &str, username: &str) -> Self {
        self.state.write().unwrap().profiles.push(Profile {
            id: UserId::from(id),
            username: username.to_string(),
            full_name: None,
            avatar_url: None,
        });
        self
    }

    pub fn with_log(self, log: LogEntry) -> Self {
        self.state.write().unwrap().logs.push(log);
        self
    }

    pub fn with_follow(self, follower: &str, following: &str, at: OffsetDateTime) -> Self {
        self.state.write().unwrap().follows.push(Follow {
            follower_id: UserId::from(follower),
            following_id: UserId::from(following),
            created_at: at,
        });
        self
    }

    pub fn with_like(self, id: &str, user: &str, log: &str, at: OffsetDateTime) -> Self {
        self.state.write().unwrap().likes.push(Like {
            id: id.to_string(),
            user_id: UserId::from(user),
            log_id: LogId::from(log),
            created_at: at,
        });
        self
    }

    pub fn with_comment(
        self,
        id: &str,
        user: &str,
        log: &str,
        content: &str,
        at: OffsetDateTime,
    ) -> Self {
        self.state.write().unwrap().comments.push(Comment {
            id: id.to_string(),
            log_id: LogId::from(log),
            user_id: UserId::from(user),
            content: content.to_string(),
            created_at: at,
            author: None,
        });
        self
    }

    pub fn with_token(self, token: &str, user: &str) -> Self {
        self.state
            .write()
            .unwrap()
            .tokens
            .insert(token.to_string(), UserId::from(user));
        self
    }

    /// Inserting a log with this title fails.
    pub fn rejecting_title(self, title: &str) -> Self {
        self.state
            .write()
            .unwrap()
            .rejected_titles
            .insert(title.to_string());
        self
    }

    /// Every operation fails as if the store were unreachable.
    pub fn unavailable(self) -> Self {
        self.state.write().unwrap().unavailable = true;
        self
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.state.read().unwrap().logs.clone()
    }

    pub fn follows(&self) -> Vec<Follow> {
        self.state.read().unwrap().follows.clone()
    }

    pub fn likes(&self) -> Vec<Like> {
        self.state.read().unwrap().likes.clone()
    }

    fn check(&self) -> Result<(), String> {
        if self.state.read().unwrap().unavailable {
            Err("row store unavailable".to_string())
        } else {
            Ok(())
        }
    }
}

/// A log entry with placeholder text, for seeding the mock.
#[allow(dead_code)]
pub fn log_entry(id: &str, user: &str, title: &str, shared: bool, at: OffsetDateTime) -> LogEntry {
    LogEntry {
        id: LogId::from(id),
        user_id: UserId::from(user),
        content_type: crate::domain::models::ContentType::Book,
        title: title.to_string(),
        creator: None,
        consumed_date: at.date(),
        key_points: "key points".to_string(),
        practical_application: "practical application".to_string(),
        summary: "summary".to_string(),
        is_shared: shared,
        created_at: at,
        updated_at: None,
        author: None,
    }
}

fn newest_first<T>(mut items: Vec<T>, at: impl Fn(&T) -> OffsetDateTime) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(at(item)));
    items
}

#[async_trait]
impl ActivityReader for MockStore {
    async fn fetch_activity_records(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ActivityRecord>, StreakError> {
        self.check().map_err(StreakError::ActivityRead)?;
        let state = self.state.read().unwrap();

        let from_logs = state
            .logs
            .iter()
            .filter(|l| &l.user_id == user_id)
            .map(|l| ActivityRecord {
                log_id: l.id.clone(),
                created_at: l.created_at,
                updated_at: l.updated_at,
            });

        Ok(state
            .activity
            .get(user_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .chain(from_logs)
            .collect())
    }
}

#[async_trait]
impl IdentityProvider for MockStore {
    async fn resolve(&self, access_token: &str) -> Result<Option<UserId>, AuthError> {
        self.check().map_err(AuthError::Unavailable)?;
        Ok(self.state.read().unwrap().tokens.get(access_token).cloned())
    }
}

#[async_trait]
impl LogStore for MockStore {
    async fn insert_log(
        &self,
        user_id: &UserId,
        entry: &NewLogEntry,
    ) -> Result<LogEntry, LogError> {
        self.check().map_err(LogError::Store)?;
        let mut state = self.state.write().unwrap();

        if state.rejected_titles.contains(&entry.title) {
            return Err(LogError::store("insert rejected"));
        }

        let log = LogEntry {
            id: LogId::new(state.next_id("log")),
            user_id: user_id.clone(),
            content_type: entry.content_type,
            title: entry.title.clone(),
            creator: entry.creator.clone(),
            consumed_date: entry.consumed_date,
            key_points: entry.key_points.clone(),
            practical_application: entry.practical_application.clone(),
            summary: entry.summary.clone(),
            is_shared: entry.is_shared,
            created_at: INSERTED_AT,
            updated_at: None,
            author: None,
        };
        state.logs.push(log.clone());

        Ok(log)
    }

    async fn list_logs(&self, user_id: &UserId) -> Result<Vec<LogEntry>, LogError> {
        self.check().map_err(LogError::Store)?;
        let logs = self
            .state
            .read()
            .unwrap()
            .logs
            .iter()
            .filter(|l| &l.user_id == user_id)
            .cloned()
            .collect();

        Ok(newest_first(logs, |l: &LogEntry| l.created_at))
    }

    async fn log_count(&self, user_id: &UserId) -> Result<u64, LogError> {
        self.check().map_err(LogError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .logs
            .iter()
            .filter(|l| &l.user_id == user_id)
            .count() as u64)
    }

    async fn list_shared_logs(&self, authors: &[UserId]) -> Result<Vec<LogEntry>, LogError> {
        self.check().map_err(LogError::Store)?;
        let state = self.state.read().unwrap();
        let logs = state
            .logs
            .iter()
            .filter(|l| l.is_shared && authors.contains(&l.user_id))
            .cloned()
            .map(|mut l| {
                l.author = state.summary(&l.user_id);
                l
            })
            .collect();

        Ok(newest_first(logs, |l: &LogEntry| l.created_at))
    }

    async fn delete_log(&self, user_id: &UserId, log_id: &LogId) -> Result<bool, LogError> {
        self.check().map_err(LogError::Store)?;
        let mut state = self.state.write().unwrap();
        let before = state.logs.len();
        state
            .logs
            .retain(|l| !(&l.id == log_id && &l.user_id == user_id));

        Ok(state.logs.len() != before)
    }
}

#[async_trait]
impl SocialStore for MockStore {
    async fn insert_follow(&self, follower: &UserId, following: &UserId) -> Result<(), SocialError> {
        self.check().map_err(SocialError::Store)?;
        self.state.write().unwrap().follows.push(Follow {
            follower_id: follower.clone(),
            following_id: following.clone(),
            created_at: INSERTED_AT,
        });
        Ok(())
    }

    async fn delete_follow(
        &self,
        follower: &UserId,
        following: &UserId,
    ) -> Result<bool, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let mut state = self.state.write().unwrap();
        let before = state.follows.len();
        state
            .follows
            .retain(|f| !(&f.follower_id == follower && &f.following_id == following));
        Ok(state.follows.len() != before)
    }

    async fn follow_exists(
        &self,
        follower: &UserId,
        following: &UserId,
    ) -> Result<bool, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .follows
            .iter()
            .any(|f| &f.follower_id == follower && &f.following_id == following))
    }

    async fn following_ids(&self, follower: &UserId) -> Result<Vec<UserId>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .follows
            .iter()
            .filter(|f| &f.follower_id == follower)
            .map(|f| f.following_id.clone())
            .collect())
    }

    async fn follower_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .follows
            .iter()
            .filter(|f| &f.following_id == user_id)
            .map(|f| f.follower_id.clone())
            .collect())
    }

    async fn follower_count(&self, user_id: &UserId) -> Result<u64, SocialError> {
        Ok(self.follower_ids(user_id).await?.len() as u64)
    }

    async fn following_count(&self, user_id: &UserId) -> Result<u64, SocialError> {
        Ok(self.following_ids(user_id).await?.len() as u64)
    }

    async fn recent_followers(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Follow>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let follows = self
            .state
            .read()
            .unwrap()
            .follows
            .iter()
            .filter(|f| &f.following_id == user_id)
            .cloned()
            .collect();

        let mut follows = newest_first(follows, |f: &Follow| f.created_at);
        follows.truncate(limit);
        Ok(follows)
    }

    async fn profiles(&self, ids: &[UserId]) -> Result<Vec<Profile>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .profiles
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn profile_by_username(&self, username: &str) -> Result<Option<Profile>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn search_profiles(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let fragment = fragment.to_lowercase();
        let mut profiles = self
            .state
            .read()
            .unwrap()
            .profiles
            .iter()
            .filter(|p| p.username.to_lowercase().contains(&fragment))
            .cloned()
            .collect::<Vec<_>>();

        profiles.sort_by(|a, b| a.username.cmp(&b.username));
        profiles.truncate(limit);
        Ok(profiles)
    }

    async fn like_count(&self, log_id: &LogId) -> Result<u64, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .likes
            .iter()
            .filter(|l| &l.log_id == log_id)
            .count() as u64)
    }

    async fn has_liked(&self, user_id: &UserId, log_id: &LogId) -> Result<bool, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .likes
            .iter()
            .any(|l| &l.log_id == log_id && &l.user_id == user_id))
    }

    async fn insert_like(&self, user_id: &UserId, log_id: &LogId) -> Result<(), SocialError> {
        self.check().map_err(SocialError::Store)?;
        let mut state = self.state.write().unwrap();
        let id = state.next_id("like");
        state.likes.push(Like {
            id,
            user_id: user_id.clone(),
            log_id: log_id.clone(),
            created_at: INSERTED_AT,
        });
        Ok(())
    }

    async fn delete_like(&self, user_id: &UserId, log_id: &LogId) -> Result<(), SocialError> {
        self.check().map_err(SocialError::Store)?;
        self.state
            .write()
            .unwrap()
            .likes
            .retain(|l| !(&l.log_id == log_id && &l.user_id == user_id));
        Ok(())
    }

    async fn recent_likes(
        &self,
        log_ids: &[LogId],
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<Like>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let likes = self
            .state
            .read()
            .unwrap()
            .likes
            .iter()
            .filter(|l| log_ids.contains(&l.log_id) && &l.user_id != exclude)
            .cloned()
            .collect();

        let mut likes = newest_first(likes, |l: &Like| l.created_at);
        likes.truncate(limit);
        Ok(likes)
    }

    async fn comments_for(&self, log_id: &LogId) -> Result<Vec<Comment>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let state = self.state.read().unwrap();
        let mut comments = state
            .comments
            .iter()
            .filter(|c| &c.log_id == log_id)
            .cloned()
            .map(|mut c| {
                c.author = state.summary(&c.user_id);
                c
            })
            .collect::<Vec<_>>();

        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn insert_comment(
        &self,
        user_id: &UserId,
        log_id: &LogId,
        content: &str,
    ) -> Result<Comment, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let mut state = self.state.write().unwrap();
        let comment = Comment {
            id: state.next_id("comment"),
            log_id: log_id.clone(),
            user_id: user_id.clone(),
            content: content.to_string(),
            created_at: INSERTED_AT,
            author: state.summary(user_id),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(
        &self,
        user_id: &UserId,
        log_id: &LogId,
        comment_id: &str,
    ) -> Result<bool, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let mut state = self.state.write().unwrap();
        let before = state.comments.len();
        state.comments.retain(|c| {
            !(c.id == comment_id && &c.log_id == log_id && &c.user_id == user_id)
        });
        Ok(state.comments.len() != before)
    }

    async fn recent_comments(
        &self,
        log_ids: &[LogId],
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<Comment>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        let comments = self
            .state
            .read()
            .unwrap()
            .comments
            .iter()
            .filter(|c| log_ids.contains(&c.log_id) && &c.user_id != exclude)
            .cloned()
            .collect();

        let mut comments = newest_first(comments, |c: &Comment| c.created_at);
        comments.truncate(limit);
        Ok(comments)
    }

    async fn shared_log_refs(&self, user_id: &UserId) -> Result<Vec<LogRef>, SocialError> {
        self.check().map_err(SocialError::Store)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .logs
            .iter()
            .filter(|l| l.is_shared && &l.user_id == user_id)
            .map(|l| LogRef {
                id: l.id.clone(),
                title: l.title.clone(),
            })
            .collect())
    }
}
