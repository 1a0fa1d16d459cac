use async_trait::async_trait;

use crate::domain::{
    models::{AuthContext, Streak, UserId},
    StreakError,
};

/// Inbound port for streak queries.
#[async_trait]
pub trait StreakService: Send + Sync + 'static {
    /// Current streak of `user_id`.
    async fn get_streak(&self, user_id: &UserId) -> Result<Streak, StreakError>;

    /// Current streak of the caller. Anonymous callers get an empty streak
    /// rather than an error.
    async fn get_current_user_streak(&self, auth: &AuthContext) -> Result<Streak, StreakError>;
}
