use time::OffsetDateTime;

use super::LogId;

/// The activity-relevant slice of one log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub log_id: LogId,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl ActivityRecord {
    pub fn new(log_id: impl Into<LogId>, created_at: OffsetDateTime) -> Self {
        Self {
            log_id: log_id.into(),
            created_at,
            updated_at: None,
        }
    }

    pub fn with_updated_at(mut self, updated_at: OffsetDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Activity instants contributed by this record: the creation, plus the
    /// last update when it is a different instant.
    pub fn instants(&self) -> impl Iterator<Item = OffsetDateTime> {
        let update = self.updated_at.filter(|updated| *updated != self.created_at);
        std::iter::once(self.created_at).chain(update)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn creation_only() {
        let record = ActivityRecord::new("l1", datetime!(2024-03-01 10:00 UTC));
        assert_eq!(record.instants().count(), 1);
    }

    #[test]
    fn update_equal_to_creation_counts_once() {
        let at = datetime!(2024-03-01 10:00 UTC);
        let record = ActivityRecord::new("l1", at).with_updated_at(at);
        assert_eq!(record.instants().collect::<Vec<_>>(), vec![at]);
    }

    #[test]
    fn same_instant_in_other_offset_counts_once() {
        let record = ActivityRecord::new("l1", datetime!(2024-03-01 10:00 UTC))
            .with_updated_at(datetime!(2024-03-01 12:00 +2));
        assert_eq!(record.instants().count(), 1);
    }

    #[test]
    fn real_edit_counts_twice() {
        let record = ActivityRecord::new("l1", datetime!(2024-03-01 10:00 UTC))
            .with_updated_at(datetime!(2024-03-02 09:00 UTC));
        assert_eq!(record.instants().count(), 2);
    }
}
