use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};
use time::Duration;

use crate::domain::streak::{StreakCalculator, StreakPolicy, StreakPolicyKind};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub rowstore: RowStoreSettings,
    pub streak: StreakSettings,
    pub notifications: NotificationSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct RowStoreSettings {
    pub url: String,
    pub anon_key: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RowStoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStoreSettings")
            .field("url", &self.url)
            .field("anon_key", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct StreakSettings {
    #[serde(default)]
    pub policy: StreakPolicyKind,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub window_hours: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_lookback: u32,
}

/// Longest rolling window accepted from configuration, one year.
const MAX_WINDOW_HOURS: i64 = 24 * 366;

impl StreakSettings {
    /// Rejects rolling windows that would lapse every streak or overflow.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.policy == StreakPolicyKind::RollingWindow
            && !(1..=MAX_WINDOW_HOURS).contains(&self.window_hours)
        {
            return Err(config::ConfigError::Message(format!(
                "streak.window_hours must be between 1 and {}, got {}",
                MAX_WINDOW_HOURS, self.window_hours
            )));
        }

        Ok(())
    }

    /// The calculator this deployment runs. Only one policy is ever active.
    pub fn calculator(&self) -> StreakCalculator {
        let policy = match self.policy {
            StreakPolicyKind::RollingWindow => StreakPolicy::RollingWindow {
                window: Duration::hours(self.window_hours),
            },
            StreakPolicyKind::CalendarDay => StreakPolicy::CalendarDay,
        };

        StreakCalculator::new(policy).with_max_lookback(self.max_lookback)
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub limit_per_source: usize,
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .expect("Failed to parse APP_ENVIRONMENT");
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("LEARNLOG")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings.streak.validate()?;

    Ok(settings)
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
