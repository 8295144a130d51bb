//! Store configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! snapshot_path = "state/playground.json"
//! presence = "explicit"
//!
//! [throttle]
//! interval_ms = 1000
//! leading = true
//! trailing = true
//!
//! [github]
//! base_url = "https://api.github.com"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::GitHubConfig;
use crate::error::Result;
use crate::hydrate::PresencePolicy;
use crate::persist::ThrottleConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Where [`JsonFileMedium`](crate::JsonFileMedium) keeps the snapshot.
    pub snapshot_path: PathBuf,
    pub throttle: ThrottleConfig,
    pub presence: PresencePolicy,
    pub github: GitHubConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("playground-state.json"),
            throttle: ThrottleConfig::default(),
            presence: PresencePolicy::default(),
            github: GitHubConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(raw)?;
        config.throttle.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::time::Duration;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn reads_nested_sections() {
        let config = StoreConfig::from_toml_str(
            r#"
            snapshot_path = "/tmp/state.json"
            presence = "truthy"

            [throttle]
            interval_ms = 250
            leading = true

            [github]
            base_url = "https://ghe.example.com/api/v3"
            "#,
        )
        .unwrap();

        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/state.json"));
        assert_eq!(config.presence, PresencePolicy::Truthy);
        assert_eq!(config.throttle.interval, Duration::from_millis(250));
        assert!(config.throttle.leading);
        assert!(config.throttle.trailing);
        assert_eq!(config.github.base_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.user_agent, GitHubConfig::default().user_agent);
    }

    #[test]
    fn invalid_throttle_is_rejected() {
        let err = StoreConfig::from_toml_str("[throttle]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, StoreError::InvalidThrottle(_)));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = StoreConfig::from_toml_str("presence = [").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
