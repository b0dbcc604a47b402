//! TOML-based application configuration.
//!
//! Stores:
//! - Canvas credentials and query settings
//! - Locations of the known-id file and the local reminder store
//! - Reminder list name
//! - Log level
//!
//! Configuration is stored at `~/.univreminder/config.toml`. It is loaded
//! once at startup and passed explicitly to whatever needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::canvas::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::reminders::DEFAULT_LIST_NAME;

const CONFIG_FILE: &str = "config.toml";
const KNOWN_IDS_FILE: &str = "known_todo_ids";
const REMINDERS_FILE: &str = "reminders.json";

/// Canvas API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

/// File locations. Unset paths resolve inside the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub known_ids_path: Option<String>,
    #[serde(default)]
    pub reminders_path: Option<String>,
}

/// Reminder store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_list_name")]
    pub list_name: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.univreminder/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_per_page() -> u32 {
    100
}
fn default_window_days() -> u32 {
    30
}
fn default_list_name() -> String {
    DEFAULT_LIST_NAME.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: default_base_url(),
            per_page: default_per_page(),
            window_days: default_window_days(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            list_name: default_list_name(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Short keys accepted for convenience.
fn canonical_key(key: &str) -> &str {
    match key {
        "token" => "canvas.token",
        other => other,
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u32>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as a positive number")))?;
                        if n == 0 {
                            return Err(invalid("must be greater than zero".into()));
                        }
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from the default location, writing defaults if the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, writing defaults there if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file found, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key. Unset values are `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, canonical_key(key))?;
        match val {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Whether `key` names a settable value, set or not.
    pub fn has_key(&self, key: &str) -> bool {
        serde_json::to_value(self).ok().is_some_and(|json| {
            Self::get_json_value_by_path(&json, canonical_key(key))
                .is_some_and(|v| !v.is_object())
        })
    }

    /// Set a config value by key in memory. Call [`Config::save`] to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = canonical_key(key);
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// The Canvas token, or an error naming the key to set.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        let token = self.canvas.token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingKey("canvas.token".into()));
        }
        Ok(token)
    }

    pub fn known_ids_path(&self, data_dir: &Path) -> PathBuf {
        self.storage
            .known_ids_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(KNOWN_IDS_FILE))
    }

    pub fn reminders_path(&self, data_dir: &Path) -> PathBuf {
        self.storage
            .reminders_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(REMINDERS_FILE))
    }
}
