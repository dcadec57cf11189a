use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::core::error::WatchError;

pub const DEFAULT_CONFIG_PATH: &str = "config/disaster-watch.toml";
pub const EONET_EVENTS_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3/events";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Events endpoint; `status=open` is always appended.
    pub feed_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Optional `limit` query parameter forwarded to the feed.
    pub query_limit: Option<u32>,
    /// Optional `days` query parameter forwarded to the feed.
    pub query_days: Option<u32>,
    /// Records kept after sorting by date.
    pub max_records: usize,
    /// Exclude events without any coordinate pair instead of placing them at (0, 0).
    pub drop_unlocated: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: EONET_EVENTS_URL.to_string(),
            timeout_ms: 10_000,
            user_agent: format!("disaster-watch/{}", env!("CARGO_PKG_VERSION")),
            query_limit: None,
            query_days: None,
            max_records: 10,
            drop_unlocated: false,
        }
    }
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, WatchError> {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let path = path.map(Path::new).unwrap_or(default_path);

    if !path.exists() {
        tracing::debug!("config {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| WatchError::Config(e.to_string()))?;
    let cfg: AppConfig =
        toml::from_str(&content).map_err(|e| WatchError::Config(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &AppConfig) -> Result<(), WatchError> {
    if cfg.feed_url.trim().is_empty() {
        return Err(WatchError::Config("feed_url must not be empty".into()));
    }
    if cfg.timeout_ms == 0 {
        return Err(WatchError::Config("timeout_ms must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: AppConfig = toml::from_str("max_records = 5\nquery_days = 20\n").unwrap();
        assert_eq!(cfg.max_records, 5);
        assert_eq!(cfg.query_days, Some(20));
        assert_eq!(cfg.feed_url, EONET_EVENTS_URL);
        assert!(!cfg.drop_unlocated);
    }

    #[test]
    fn missing_file_means_defaults() {
        let cfg = load_config(Some("does/not/exist.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn empty_feed_url_is_rejected() {
        let path = std::env::temp_dir().join("dw_config_empty_url.toml");
        std::fs::write(&path, "feed_url = \"\"\n").unwrap();
        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, WatchError::Config(_)));
    }
}
