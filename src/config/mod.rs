//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML file
//! (`--config`, or `<config dir>/pairwise-pubmed/config.toml`), and
//! `PAIRWISE_PUBMED_*` environment variables with `__` between section and
//! key (e.g. `PAIRWISE_PUBMED_SEARCH__WILDCARD_LIMIT=200`).

mod file_config;

pub use file_config::ConfigFileError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compose::{ModeDefaults, QueryComposer, PUBMED_WILDCARD_LIMIT};
use crate::utils::{validate_base_url, ValidationError, PUBMED_SEARCH_URL};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PAIRWISE_PUBMED";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Search endpoint and limits
    #[serde(default)]
    pub search: SearchConfig,

    /// Option values used when a command or request leaves them out
    #[serde(default)]
    pub defaults: ModeDefaults,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL the generated string is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum wildcards per string before a warning is raised
    #[serde(default = "default_wildcard_limit")]
    pub wildcard_limit: usize,

    /// Strings at least this many characters long are shown collapsed
    #[serde(default = "default_collapse_threshold")]
    pub collapse_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            wildcard_limit: default_wildcard_limit(),
            collapse_threshold: default_collapse_threshold(),
        }
    }
}

fn default_base_url() -> String {
    PUBMED_SEARCH_URL.to_string()
}

fn default_wildcard_limit() -> usize {
    PUBMED_WILDCARD_LIMIT
}

fn default_collapse_threshold() -> usize {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `-v` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Settings {
    /// Composer honoring the configured wildcard limit
    pub fn composer(&self) -> QueryComposer {
        QueryComposer::with_wildcard_limit(self.search.wildcard_limit)
    }

    /// Check values that cannot be expressed in the type system, normalizing
    /// the base URL in place
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.search.base_url = validate_base_url(&self.search.base_url)?;
        Ok(())
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Default location of the configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pairwise-pubmed").join("config.toml"))
}

/// Find an existing configuration file in the default locations.
///
/// `./pairwise-pubmed.toml` takes precedence over the user config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("pairwise-pubmed.toml");
    if local.is_file() {
        return Some(local);
    }
    default_config_path().filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IntersectionField, ProximityField};
    use crate::utils::search_url;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let mut settings = Settings::default();
        assert_eq!(settings.search.base_url, PUBMED_SEARCH_URL);
        assert_eq!(settings.search.wildcard_limit, 256);
        assert_eq!(settings.search.collapse_threshold, 1000);
        assert_eq!(settings.defaults.proximity_distance, 2);
        assert_eq!(settings.defaults.proximity_field, ProximityField::TitleAbstract);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[search]
wildcard_limit = 100

[defaults]
intersection_field = "tw"
proximity_distance = 3
"#,
        )
        .unwrap();

        let settings = load_config(&path).unwrap();
        assert_eq!(settings.search.wildcard_limit, 100);
        assert_eq!(settings.search.base_url, PUBMED_SEARCH_URL);
        assert_eq!(settings.defaults.intersection_field, IntersectionField::TextWord);
        assert_eq!(settings.defaults.proximity_distance, 3);
        assert_eq!(settings.composer().wildcard_limit(), 100);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut settings = Settings::default();
        settings.search.base_url = "ftp://example.org/?term=".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_trims_base_url() {
        let mut settings = Settings::default();
        settings.search.base_url = format!("  {} ", PUBMED_SEARCH_URL);
        settings.validate().unwrap();

        assert_eq!(settings.search.base_url, PUBMED_SEARCH_URL);
        assert_eq!(
            search_url(&settings.search.base_url, "a b"),
            format!("{}a+b", PUBMED_SEARCH_URL)
        );
    }

    #[test]
    fn test_default_config_path_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("pairwise-pubmed/config.toml"));
        }
    }
}
