use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    /// The user has never logged anything.
    NoActivity,
    /// There is activity, but not recent enough to keep the streak alive.
    Lapsed,
    Active,
}

/// A user's current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub count: u32,
    pub status: StreakStatus,
    pub last_activity: Option<OffsetDateTime>,
}

impl Streak {
    pub fn no_activity() -> Self {
        Self {
            count: 0,
            status: StreakStatus::NoActivity,
            last_activity: None,
        }
    }

    pub fn lapsed(last_activity: OffsetDateTime) -> Self {
        Self {
            count: 0,
            status: StreakStatus::Lapsed,
            last_activity: Some(last_activity),
        }
    }

    pub fn active(count: u32, last_activity: OffsetDateTime) -> Self {
        Self {
            count,
            status: StreakStatus::Active,
            last_activity: Some(last_activity),
        }
    }
}
