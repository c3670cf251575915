use crate::common::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_CONFIG_FILE, DEFAULT_TIMEOUT_SECONDS, EMOJI_DATA_URL,
    MAX_CONCURRENCY, TWITTER_ID_PLACEHOLDER, TWITTER_URL_TEMPLATE, UNICODE_DATA_URL,
};
use crate::common::error::{Result, ScraperError};
use crate::pipeline::PipelineConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sources: SourcesConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub emoji_data_url: String,
    pub unicode_data_url: String,
    pub image_url_template: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            emoji_data_url: EMOJI_DATA_URL.to_string(),
            unicode_data_url: UNICODE_DATA_URL.to_string(),
            image_url_template: TWITTER_URL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub concurrency: usize,
    pub timeout_seconds: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directory for the daily JSON log file; stderr only when unset
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load from `path`, or from `emoji_scraper.toml` in the working
    /// directory when no path is given. Only an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `EMOJI_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("EMOJI_CONCURRENCY") {
            self.validation.concurrency = parse_env("EMOJI_CONCURRENCY", &v)?;
        }
        if let Some(v) = lookup("EMOJI_TIMEOUT_SECONDS") {
            self.validation.timeout_seconds = parse_env("EMOJI_TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = lookup("EMOJI_IMAGE_URL_TEMPLATE") {
            self.sources.image_url_template = v;
        }
        if let Some(v) = lookup("EMOJI_LOG_DIR") {
            self.logging.log_dir = Some(PathBuf::from(v));
        }
        Ok(())
    }

    /// Reject settings a run cannot work with. Concurrency below 1 is raised
    /// to 1; above `MAX_CONCURRENCY` it is an error.
    pub fn validate(&mut self) -> Result<()> {
        if !self.sources.image_url_template.contains(TWITTER_ID_PLACEHOLDER) {
            return Err(ScraperError::Config(format!(
                "image_url_template must contain {TWITTER_ID_PLACEHOLDER}"
            )));
        }
        for (key, url) in [
            ("emoji_data_url", &self.sources.emoji_data_url),
            ("unicode_data_url", &self.sources.unicode_data_url),
            ("image_url_template", &self.sources.image_url_template),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ScraperError::Config(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.validation.timeout_seconds == 0 {
            return Err(ScraperError::Config("timeout_seconds must be > 0".into()));
        }
        if self.validation.concurrency > MAX_CONCURRENCY {
            return Err(ScraperError::Config(format!(
                "concurrency must be at most {MAX_CONCURRENCY}, got {}",
                self.validation.concurrency
            )));
        }
        self.validation.concurrency = self.validation.concurrency.max(1);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.validation.timeout_seconds)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            emoji_data_url: self.sources.emoji_data_url.clone(),
            unicode_data_url: self.sources.unicode_data_url.clone(),
            image_url_template: self.sources.image_url_template.clone(),
            concurrency: self.validation.concurrency,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScraperError::Config(format!("{key} has an invalid value '{value}'")))
}
