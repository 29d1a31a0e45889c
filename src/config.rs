//! Runtime configuration: API location and credentials.
//!
//! Read from `~/.config/prodform/config.json` when present, then overridden by
//! `PRODFORM_API_URL` and `PRODFORM_API_TOKEN`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Path of the create-product endpoint, relative to the API base URL.
pub const PRODUCTS_PATH: &str = "/api/products";

const DEFAULT_API_URL: &str = "http://localhost:3000";
const API_URL_VAR: &str = "PRODFORM_API_URL";
const API_TOKEN_VAR: &str = "PRODFORM_API_TOKEN";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`Config`].
    #[error("invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The platform does not provide a config directory.
    #[error("could not determine XDG config directory")]
    NoConfigDir,
}

/// Settings for talking to the storefront API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the storefront, e.g. `https://shop.example.com`.
    pub api_url: String,
    /// Bearer token forwarded to the API; authorization itself happens server-side.
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
        }
    }
}

impl Config {
    /// Loads the user config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path()?;
        let config = Self::from_file(&path)?;
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Reads a config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides looked up by variable name; empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(API_URL_VAR) {
            self.api_url = url;
        }
        if let Some(token) = non_empty(API_TOKEN_VAR) {
            self.api_token = Some(token);
        }
        self
    }

    /// Full URL of the create-product endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{PRODUCTS_PATH}", self.api_url.trim_end_matches('/'))
    }
}

/// Returns `~/.config/prodform/config.json` (or the platform equivalent).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("prodform").join("config.json"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::tempdir;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn endpoint_joins_products_path() {
        let config = Config::default();
        assert_eq!(config.endpoint(), "http://localhost:3000/api/products");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let config = Config {
            api_url: "https://shop.example.com/".into(),
            api_token: None,
        };
        assert_eq!(config.endpoint(), "https://shop.example.com/api/products");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"api_url": "https://shop.example.com", "api_token": "secret"}"#,
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_url, "https://shop.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_token": "secret"}"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let config = Config::default().with_overrides(env(&[
            ("PRODFORM_API_URL", "https://staging.example.com"),
            ("PRODFORM_API_TOKEN", "t0ken"),
        ]));
        assert_eq!(config.api_url, "https://staging.example.com");
        assert_eq!(config.api_token.as_deref(), Some("t0ken"));
    }

    #[test]
    fn empty_env_values_ignored() {
        let config = Config::default().with_overrides(env(&[("PRODFORM_API_URL", "  ")]));
        assert_eq!(config.api_url, "http://localhost:3000");
    }
}
