use serde::Serialize;
use strum::Display;
use time::OffsetDateTime;

use super::{LogRef, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub created_at: OffsetDateTime,
    pub actor: Profile,
    pub log: Option<LogRef>,
    pub comment_content: Option<String>,
}

impl Notification {
    /// One-line description, e.g. `liked your log "Deep Work"`.
    pub fn describe(&self) -> String {
        let title = self.log.as_ref().map(|l| l.title.as_str()).unwrap_or_default();
        match self.kind {
            NotificationKind::Follow => "started following you".to_string(),
            NotificationKind::Like => format!("liked your log \"{title}\""),
            NotificationKind::Comment => format!("commented on your log \"{title}\""),
        }
    }
}
