//! Streak calculation over a user's activity history.
//!
//! Two policies exist and a deployment runs exactly one of them:
//!
//! - [`StreakPolicy::RollingWindow`]: consecutive activity instants at most
//!   `window` apart (32 hours by default). The streak lapses once the most
//!   recent instant is more than `window` before now.
//! - [`StreakPolicy::CalendarDay`]: consecutive UTC calendar days with at
//!   least one activity. The streak lapses once the most recent active day is
//!   before yesterday.
//!
//! Both are pure functions of the records and `now`.

use std::collections::BTreeSet;
use std::iter;

use itertools::Itertools;
use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

use super::models::{ActivityRecord, Streak};

/// Cap on the reported streak count. A count of `MAX_STREAK_LOOKBACK` means
/// `MAX_STREAK_LOOKBACK - 1` gaps were compared.
pub const MAX_STREAK_LOOKBACK: u32 = 1000;

/// Largest gap between activities that keeps a rolling-window streak alive.
pub const DEFAULT_STREAK_WINDOW: Duration = Duration::hours(32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakPolicy {
    RollingWindow { window: Duration },
    CalendarDay,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        StreakPolicy::RollingWindow {
            window: DEFAULT_STREAK_WINDOW,
        }
    }
}

/// Policy names as written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicyKind {
    #[default]
    RollingWindow,
    CalendarDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCalculator {
    policy: StreakPolicy,
    max_lookback: u32,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new(StreakPolicy::default())
    }
}

impl StreakCalculator {
    pub fn new(policy: StreakPolicy) -> Self {
        Self {
            policy,
            max_lookback: MAX_STREAK_LOOKBACK,
        }
    }

    /// Override the cap on counted periods. A cap below one is raised to one
    /// so that a single qualifying activity always counts.
    pub fn with_max_lookback(mut self, max_lookback: u32) -> Self {
        self.max_lookback = max_lookback.max(1);
        self
    }

    pub fn policy(&self) -> StreakPolicy {
        self.policy
    }

    pub fn max_lookback(&self) -> u32 {
        self.max_lookback
    }

    pub fn calculate(&self, records: &[ActivityRecord], now: OffsetDateTime) -> Streak {
        let instants = records
            .iter()
            .flat_map(ActivityRecord::instants)
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect::<Vec<_>>();

        let Some(&most_recent) = instants.first() else {
            return Streak::no_activity();
        };

        match self.policy {
            StreakPolicy::RollingWindow { window } => {
                self.rolling_window(&instants, most_recent, now, window)
            }
            StreakPolicy::CalendarDay => self.calendar_days(&instants, most_recent, now),
        }
    }

    /// `instants` must be sorted newest first.
    fn rolling_window(
        &self,
        instants: &[OffsetDateTime],
        most_recent: OffsetDateTime,
        now: OffsetDateTime,
        window: Duration,
    ) -> Streak {
        if now - most_recent > window {
            return Streak::lapsed(most_recent);
        }

        let chained = instants
            .iter()
            .tuple_windows()
            .take_while(|(newer, older)| **newer - **older <= window)
            .take(self.max_lookback as usize - 1)
            .count();

        Streak::active(chained as u32 + 1, most_recent)
    }

    fn calendar_days(
        &self,
        instants: &[OffsetDateTime],
        most_recent: OffsetDateTime,
        now: OffsetDateTime,
    ) -> Streak {
        let days = instants.iter().map(|i| utc_date(*i)).collect::<BTreeSet<_>>();
        let latest_day = utc_date(most_recent);

        let today = utc_date(now);
        let yesterday = today.previous_day().unwrap_or(today);
        if latest_day < yesterday {
            return Streak::lapsed(most_recent);
        }

        let count = iter::successors(Some(latest_day), |day| day.previous_day())
            .take_while(|day| days.contains(day))
            .take(self.max_lookback as usize)
            .count();

        Streak::active(count as u32, most_recent)
    }
}

fn utc_date(instant: OffsetDateTime) -> Date {
    instant.to_offset(UtcOffset::UTC).date()
}
