//! Process configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database location, public base URL, search limits and logging settings.
//! - Keep environment parsing out of search and audit code.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Present-but-invalid values are rejected rather than ignored.

use crate::logging::default_log_level;
use crate::service::help_search::{HelpSearchOptions, DEFAULT_ARTICLE_LIMIT, DEFAULT_FAQ_LIMIT};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CONDOHELP_DB_PATH";
pub const ENV_BASE_URL: &str = "CONDOHELP_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "CONDOHELP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CONDOHELP_LOG_DIR";
pub const ENV_FAQ_LIMIT: &str = "CONDOHELP_FAQ_LIMIT";
pub const ENV_ARTICLE_LIMIT: &str = "CONDOHELP_ARTICLE_LIMIT";

const DEFAULT_DB_FILE_NAME: &str = "condohelp.sqlite3";
const DEFAULT_BASE_URL: &str = "https://localhost/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    InvalidNumber { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "{ENV_BASE_URL} must be an http(s) URL, got `{value}`")
            }
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be an integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpdeskConfig {
    pub db_path: PathBuf,
    pub base_url: String,
    pub log_level: String,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub faq_limit: i64,
    pub article_limit: i64,
}

impl Default for HelpdeskConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            faq_limit: DEFAULT_FAQ_LIMIT,
            article_limit: DEFAULT_ARTICLE_LIMIT,
        }
    }
}

impl HelpdeskConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut cfg = Self::default();

        if let Some(path) = value(ENV_DB_PATH) {
            cfg.db_path = PathBuf::from(path);
        }
        if let Some(url) = value(ENV_BASE_URL) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl(url));
            }
            cfg.base_url = url;
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            cfg.log_level = level;
        }
        cfg.log_dir = value(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(limit) = value(ENV_FAQ_LIMIT) {
            cfg.faq_limit = parse_limit(ENV_FAQ_LIMIT, limit)?;
        }
        if let Some(limit) = value(ENV_ARTICLE_LIMIT) {
            cfg.article_limit = parse_limit(ENV_ARTICLE_LIMIT, limit)?;
        }

        Ok(cfg)
    }

    pub fn help_search_options(&self) -> HelpSearchOptions {
        let mut options = HelpSearchOptions::new(self.base_url.as_str());
        options.faq_limit = self.faq_limit;
        options.article_limit = self.article_limit;
        options
    }
}

fn parse_limit(key: &'static str, raw: String) -> Result<i64, ConfigError> {
    raw.parse::<i64>()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, HelpdeskConfig, ENV_BASE_URL, ENV_DB_PATH, ENV_FAQ_LIMIT};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let cfg = HelpdeskConfig::from_lookup(lookup(&[(ENV_BASE_URL, "  ")])).unwrap();
        assert_eq!(cfg, HelpdeskConfig::default());
        assert_eq!(cfg.faq_limit, 15);
        assert_eq!(cfg.article_limit, 10);
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn overrides_are_applied_to_search_options() {
        let cfg = HelpdeskConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/var/lib/condohelp/help.db"),
            (ENV_BASE_URL, "https://condo.example"),
            (ENV_FAQ_LIMIT, "5"),
        ]))
        .unwrap();

        assert_eq!(cfg.db_path, PathBuf::from("/var/lib/condohelp/help.db"));
        let options = cfg.help_search_options();
        assert_eq!(options.base_url, "https://condo.example/");
        assert_eq!(options.faq_limit, 5);
        assert_eq!(options.article_limit, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = HelpdeskConfig::from_lookup(lookup(&[(ENV_BASE_URL, "condo.example")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("condo.example".to_string()));

        let err = HelpdeskConfig::from_lookup(lookup(&[(ENV_FAQ_LIMIT, "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key, .. } if key == ENV_FAQ_LIMIT));
    }
}
