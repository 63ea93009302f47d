//! Typed runtime settings.
//!
//! Defaults cover a local run out of the box; every field can be overridden
//! through `CV_`-prefixed environment variables (`CV_FEED__PAGE_SIZE=20`),
//! optionally loaded from a `.env` file.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    /// Fixed page size for cursor pagination.
    pub page_size: u64,
    /// Simulated network latency applied to every feed call.
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// Delay before the simulated background notification fires.
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding the persisted collection slots.
    pub data_dir: PathBuf,
    pub neighborhood: String,
    pub feed: FeedSettings,
    pub notifications: NotificationSettings,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        // A missing .env file is fine.
        dotenvy::dotenv().ok();

        let settings: Settings = config::Config::builder()
            .set_default("data_dir", "./data")?
            .set_default("neighborhood", "Vila Mariana")?
            .set_default("feed.page_size", 10)?
            .set_default("feed.latency_ms", 500)?
            .set_default("notifications.delay_secs", 10)?
            .add_source(config::Environment::with_prefix("CV").separator("__"))
            .build()?
            .try_deserialize()?;

        debug!(?settings, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_local_run() {
        let settings = Settings::load().expect("defaults must deserialize");
        assert_eq!(settings.feed.page_size, 10);
        assert_eq!(settings.feed.latency_ms, 500);
        assert_eq!(settings.notifications.delay_secs, 10);
        assert_eq!(settings.neighborhood, "Vila Mariana");
    }
}
