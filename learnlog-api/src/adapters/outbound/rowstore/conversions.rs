use std::str::FromStr;

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
};

use crate::domain::{
    models::{
        ActivityRecord, Comment, ContentType, Follow, Like, LogEntry, LogId, LogRef, NewLogEntry,
        Profile, ProfileSummary, UserId,
    },
    StreakError,
};

/// Parse a store timestamp such as `2024-03-01T10:00:00.123+00:00`.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| format!("invalid timestamp {value:?}: {e}"))
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("invalid date {value:?}: {e}"))
}

/// Convert an activity projection. A missing or unparseable creation time is
/// reported rather than skipped, so a streak is never silently shortened.
pub fn to_activity_record(row: rowstore::ActivityRow) -> Result<ActivityRecord, StreakError> {
    let malformed = |value: &str| StreakError::MalformedTimestamp {
        log_id: LogId::new(row.id.clone()),
        value: value.to_string(),
    };

    let created_raw = row.created_at.as_deref().unwrap_or_default();
    let created_at = parse_timestamp(created_raw).map_err(|_| malformed(created_raw))?;

    let updated_at = match row.updated_at.as_deref() {
        Some(raw) => Some(parse_timestamp(raw).map_err(|_| malformed(raw))?),
        None => None,
    };

    Ok(ActivityRecord {
        log_id: LogId::new(row.id),
        created_at,
        updated_at,
    })
}

pub fn to_profile_summary(row: rowstore::ProfileSummaryRow) -> ProfileSummary {
    ProfileSummary {
        username: row.username,
        full_name: row.full_name,
        avatar_url: row.avatar_url,
    }
}

pub fn to_profile(row: rowstore::ProfileRow) -> Profile {
    Profile {
        id: UserId::new(row.id),
        username: row.username,
        full_name: row.full_name,
        avatar_url: row.avatar_url,
    }
}

pub fn to_log_entry(row: rowstore::LogRow) -> Result<LogEntry, String> {
    let updated_at = row.updated_at.as_deref().map(parse_timestamp).transpose()?;

    Ok(LogEntry {
        id: LogId::new(row.id),
        user_id: UserId::new(row.user_id),
        content_type: ContentType::from_str(&row.content_type).unwrap_or(ContentType::Other),
        title: row.title,
        creator: row.creator,
        consumed_date: parse_date(&row.consumed_date)?,
        key_points: row.key_points,
        practical_application: row.practical_application,
        summary: row.summary,
        is_shared: row.is_shared,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at,
        author: row.profiles.map(to_profile_summary),
    })
}

pub fn to_new_log_row(user_id: &UserId, entry: &NewLogEntry) -> rowstore::NewLogRow {
    rowstore::NewLogRow {
        user_id: user_id.to_string(),
        content_type: entry.content_type.to_string(),
        title: entry.title.clone(),
        creator: entry.creator.clone(),
        consumed_date: entry.consumed_date.to_string(),
        key_points: entry.key_points.clone(),
        practical_application: entry.practical_application.clone(),
        summary: entry.summary.clone(),
        is_shared: entry.is_shared,
    }
}

pub fn to_log_ref(row: rowstore::LogTitleRow) -> LogRef {
    LogRef {
        id: LogId::new(row.id),
        title: row.title,
    }
}

pub fn to_follow(row: rowstore::FollowRow) -> Result<Follow, String> {
    Ok(Follow {
        follower_id: UserId::new(row.follower_id),
        following_id: UserId::new(row.following_id),
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub fn to_like(row: rowstore::ReactionRow) -> Result<Like, String> {
    Ok(Like {
        id: row.id,
        user_id: UserId::new(row.user_id),
        log_id: LogId::new(row.log_id),
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub fn to_comment(row: rowstore::CommentRow) -> Result<Comment, String> {
    Ok(Comment {
        id: row.id,
        log_id: LogId::new(row.log_id),
        user_id: UserId::new(row.user_id),
        content: row.content,
        created_at: parse_timestamp(&row.created_at)?,
        author: row.profiles.map(to_profile_summary),
    })
}
