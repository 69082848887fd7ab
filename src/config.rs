//! Client configuration
//!
//! Defaults, then `~/.gymtrack/config.yaml`, then `GYMTRACK_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, LOG_FILE_NAME,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the API, also the prefix of every media URL
    pub api_url: String,
    pub request_timeout_secs: u64,
    /// Log file; defaults to `gymtrack.log` inside the config directory
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

impl Config {
    /// `~/.gymtrack`, or `./.gymtrack` when there is no home directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Load from the default directory and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir(), |key| std::env::var(key).ok())
    }

    pub fn load_from(dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        if let Some(url) = env("GYMTRACK_API_URL") {
            config.api_url = url;
        }
        if let Some(secs) = env("GYMTRACK_TIMEOUT_SECS") {
            config.request_timeout_secs = secs
                .parse()
                .context("GYMTRACK_TIMEOUT_SECS must be a number of seconds")?;
        }
        if let Some(file) = env("GYMTRACK_LOG_FILE") {
            config.log_file = Some(PathBuf::from(file));
        }

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            anyhow::bail!("api_url must start with http:// or https:// (got {:?})", self.api_url);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn log_path(&self, dir: &Path) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| dir.join(LOG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(dir.path(), no_env).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_path(dir.path()), dir.path().join("gymtrack.log"));
    }

    #[test]
    fn test_file_then_env_override() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "api_url: https://gym.example.com/\nrequest_timeout_secs: 10\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path(), no_env).unwrap();
        assert_eq!(config.api_url, "https://gym.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));

        let env: HashMap<&str, &str> = [("GYMTRACK_API_URL", "http://10.0.2.2:3333")].into();
        let config = Config::load_from(dir.path(), |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_url, "http://10.0.2.2:3333");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_rejects_bad_url_and_timeout() {
        let dir = tempdir().unwrap();
        let env = |k: &str| (k == "GYMTRACK_API_URL").then(|| "localhost:3333".to_string());
        assert!(Config::load_from(dir.path(), env).is_err());

        let env = |k: &str| (k == "GYMTRACK_TIMEOUT_SECS").then(|| "0".to_string());
        assert!(Config::load_from(dir.path(), env).is_err());
    }
}
