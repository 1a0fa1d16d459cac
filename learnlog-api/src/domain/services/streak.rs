use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::{
    models::{AuthContext, Streak, UserId},
    ports::{
        inbound::StreakService,
        outbound::{ActivityReader, Clock},
    },
    streak::StreakCalculator,
    StreakError,
};

/// Implementation of the StreakService inbound port.
///
/// Reads the activity history through an ActivityReader and evaluates it
/// with the deployment's StreakCalculator at the clock's current instant.
pub struct StreakServiceImpl<R> {
    reader: Arc<R>,
    calculator: StreakCalculator,
    clock: Arc<dyn Clock>,
}

impl<R> StreakServiceImpl<R> {
    pub fn new(reader: Arc<R>, calculator: StreakCalculator, clock: Arc<dyn Clock>) -> Self {
        Self {
            reader,
            calculator,
            clock,
        }
    }
}

#[async_trait]
impl<R: ActivityReader> StreakService for StreakServiceImpl<R> {
    #[instrument(skip(self))]
    async fn get_streak(&self, user_id: &UserId) -> Result<Streak, StreakError> {
        let records = self.reader.fetch_activity_records(user_id).await?;
        let streak = self.calculator.calculate(&records, self.clock.now());

        tracing::debug!(
            user_id = %user_id,
            records = records.len(),
            count = streak.count,
            status = ?streak.status,
            "calculated streak"
        );

        Ok(streak)
    }

    async fn get_current_user_streak(&self, auth: &AuthContext) -> Result<Streak, StreakError> {
        match auth.user_id() {
            Some(user_id) => self.get_streak(user_id).await,
            None => Ok(Streak::no_activity()),
        }
    }
}
