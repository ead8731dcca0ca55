use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// Environment variable holding the provider credential.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable overriding the provider base URL.
pub const BASE_URL_VAR: &str = "WEATHER_BASE_URL";
/// Environment variable overriding the listen address.
pub const BIND_VAR: &str = "WEATHER_BIND";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Service configuration, read once at startup.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
/// bind = "0.0.0.0:8080"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub bind: Option<String>,
}

impl Config {
    /// Load the platform config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            Self::read_file(&path)?
        } else {
            Self::default()
        };

        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Like [`Config::load`], but the file must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut cfg = Self::read_file(path)?;
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overwrite fields with non-empty values from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(key) = get(API_KEY_VAR) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(BASE_URL_VAR) {
            self.base_url = Some(url);
        }
        if let Some(bind) = get(BIND_VAR) {
            self.bind = Some(bind);
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::new(format!("{API_KEY_VAR} environment variable is not set")))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    /// Checks run before the server starts listening.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;

        let url = self.base_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::new(format!(
                "Weather provider base URL must be an HTTP or HTTPS URL, got '{url}'"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.bind(), DEFAULT_BIND);
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let cfg = Config::default();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("API_KEY environment variable is not set"));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let cfg = Config { api_key: Some(String::new()), ..Config::default() };
        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn overrides_take_precedence_over_file_values() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            base_url: None,
            bind: Some("127.0.0.1:9000".into()),
        };

        cfg.apply_overrides(env(&[(API_KEY_VAR, "ENV_KEY"), (BASE_URL_VAR, "http://localhost:1234")]));

        assert_eq!(cfg.api_key().unwrap(), "ENV_KEY");
        assert_eq!(cfg.base_url(), "http://localhost:1234");
        assert_eq!(cfg.bind(), "127.0.0.1:9000");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let mut cfg = Config { api_key: Some("FILE_KEY".into()), ..Config::default() };
        cfg.apply_overrides(env(&[(API_KEY_VAR, "")]));
        assert_eq!(cfg.api_key().unwrap(), "FILE_KEY");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("ftp://example.com".into()),
            bind: None,
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("HTTP or HTTPS"));
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"FROM_FILE\"\nbind = \"127.0.0.1:3000\"").unwrap();

        let cfg = Config::read_file(file.path()).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("FROM_FILE"));
        assert_eq!(cfg.bind(), "127.0.0.1:3000");
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = [").unwrap();

        let err = Config::read_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
