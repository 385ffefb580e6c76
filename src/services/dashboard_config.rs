use std::env;
use std::fs;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const BASE_URL_ENV: &str = "STOCKCAST_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            debounce_ms: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(filepath)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Builds the effective config. Precedence: `--base-url` flag, then
    /// `STOCKCAST_BASE_URL`, then the config file, then defaults.
    pub fn load(path: Option<&str>, base_url_flag: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(env::var(BASE_URL_ENV).ok().as_deref(), base_url_flag);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, env_base_url: Option<&str>, flag_base_url: Option<&str>) {
        if let Some(url) = flag_base_url.or(env_base_url) {
            self.base_url = url.to_string();
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
