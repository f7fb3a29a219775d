use anyhow::{Context, Result, bail};
use postkit::RetryConfig;
use postkit::backend::http::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths;

// ============================================================================
// Config Schema
// ============================================================================

/// postctl configuration, read from `config.toml` in the config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the posts service
    pub base_url: String,

    /// Global request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Retry policy for read-only commands
    pub retry: RetrySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetrySettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Attempts per read, including the first one (1 disables retries)
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: u64,

    /// Multiplier applied to the delay after each retry
    pub backoff_factor: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            backoff_factor: 2.0,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    /// Load a config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config to `path`, refusing to overwrite an existing file
    pub fn write_new(&self, path: &Path) -> Result<PathBuf> {
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Could not write {}", path.display()))?;
        Ok(path.to_path_buf())
    }

    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(mut self, base_url: Option<&str>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url.to_string();
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            );
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }
        if self.retry.backoff_factor < 1.0 {
            bail!("retry.backoff_factor must be at least 1.0");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.base_delay_ms),
            self.retry.backoff_factor,
        )
    }

    /// Whether the target is the public mock service, which never persists writes
    pub fn is_mock_service(&self) -> bool {
        self.base_url
            .trim_end_matches('/')
            .ends_with("jsonplaceholder.typicode.com")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.is_mock_service());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
base_url = "http://localhost:3000"

[retry]
max_attempts = 1
"#;
        let config: Config = toml::from_str(toml).expect("Failed to parse config");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.retry.base_delay_ms, 500);
        assert!(!config.is_mock_service());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"ftp://example.com\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("base_url"));

        fs::write(&path, "timeout_secs = 0").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_write_new_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = Config::default().write_new(&path).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_write_new_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        assert!(Config::default().write_new(&path).is_err());
    }

    #[test]
    fn test_with_overrides() {
        let config = Config::default().with_overrides(Some("http://127.0.0.1:8080"), Some(5));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_retry_config() {
        let retry = Config::default().retry_config();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.base_delay, Duration::from_millis(500));
    }
}
