//! Activity reader port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{ActivityRecord, UserId},
    StreakError,
};

/// Reads a user's complete activity history from the row store.
#[async_trait]
pub trait ActivityReader: Send + Sync + 'static {
    /// Every activity record of `user_id`, in no particular order.
    ///
    /// A user without logs yields an empty vector. Transport or permission
    /// failures are `StreakError::ActivityRead`; a timestamp that does not
    /// parse is `StreakError::MalformedTimestamp`.
    async fn fetch_activity_records(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ActivityRecord>, StreakError>;
}
