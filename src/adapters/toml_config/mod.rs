// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::LogFormat;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Table holding this tool's keys inside a config file
pub const CONFIG_SECTION: &str = "batchcrop";

/// Prefix of environment overrides, e.g. `BATCHCROP_FFMPEG_PATH`
pub const ENV_PREFIX: &str = "BATCHCROP_";

/// Every recognized key with its default, `None` when unset by default
pub const CONFIG_KEYS: [(&str, Option<&str>); 8] = [
    ("ffmpeg_path", Some("ffmpeg")),
    ("ffprobe_path", Some("ffprobe")),
    ("output_dir", None),
    ("viewport_width", Some("640")),
    ("viewport_height", Some("360")),
    ("error_excerpt_len", Some("500")),
    ("log_level", Some("info")),
    ("log_format", Some("compact")),
];

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: Arc<RwLock<HashMap<String, String>>>,
    config_file_path: Arc<RwLock<Option<PathBuf>>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the default values
    pub fn new() -> Self {
        let defaults = CONFIG_KEYS
            .iter()
            .filter_map(|(key, default)| default.map(|v| (key.to_string(), v.to_string())))
            .collect();

        Self {
            config: Arc::new(RwLock::new(defaults)),
            config_file_path: Arc::new(RwLock::new(None)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .read()
            .map_err(|_| DomainError::ConfigurationError("Config lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .write()
            .map_err(|_| DomainError::ConfigurationError("Config lock poisoned".to_string()))
    }

    fn is_known_key(key: &str) -> bool {
        CONFIG_KEYS.iter().any(|(k, _)| *k == key)
    }

    /// Path the config was loaded from, if any
    pub fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path
            .read()
            .ok()
            .and_then(|path| path.clone())
    }

    /// Deserialize config from TOML string
    ///
    /// Only the `[batchcrop]` table is read. Strings, integers and booleans are accepted.
    pub fn deserialize_config(&self, toml_content: &str) -> Result<usize, DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content).map_err(|e| {
            DomainError::ConfigurationError(format!("Failed to parse TOML config: {}", e))
        })?;

        let Some(table) = parsed.get(CONFIG_SECTION).and_then(|s| s.as_table()) else {
            return Ok(0);
        };

        let mut config = self.write()?;
        let mut applied = 0;
        for (key, value) in table {
            if !Self::is_known_key(key) {
                tracing::warn!("Ignoring unknown config key: {}", key);
                continue;
            }
            let str_value = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(DomainError::ConfigurationError(format!(
                        "Unsupported value for {}: {}",
                        key, other
                    )))
                }
            };
            config.insert(key.clone(), str_value);
            applied += 1;
        }

        Ok(applied)
    }

    /// Apply `BATCHCROP_*` overrides using the given lookup
    pub fn apply_env_overrides<F>(&self, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.write()?;
        let mut applied = 0;
        for (key, _) in CONFIG_KEYS.iter() {
            let env_var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Some(value) = lookup(&env_var) {
                tracing::debug!("Found environment override: {} = {}", env_var, value);
                config.insert(key.to_string(), value);
                applied += 1;
            }
        }
        Ok(applied)
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, DomainError> {
    match value.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(DomainError::ConfigurationError(format!(
            "Invalid value for {}: {} (expected a positive integer)",
            key, value
        ))),
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        let config = self.read()?;
        Ok(config.get(key).cloned())
    }

    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError> {
        let config = self.read()?;
        Ok(config
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        if !Self::is_known_key(key) {
            return Err(DomainError::ConfigurationError(format!(
                "Unknown config key: {}",
                key
            )));
        }
        let mut config = self.write()?;
        config.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError> {
        if !file_path.exists() {
            return Err(DomainError::ConfigurationError(format!(
                "Config file does not exist: {}",
                file_path.display()
            )));
        }

        let content = std::fs::read_to_string(file_path)
            .map_err(|e| DomainError::FsFail(format!("Failed to read config file: {}", e)))?;

        let applied = self.deserialize_config(&content)?;
        tracing::debug!("Loaded {} value(s) from {}", applied, file_path.display());

        let mut config_path = self
            .config_file_path
            .write()
            .map_err(|_| DomainError::ConfigurationError("Config lock poisoned".to_string()))?;
        *config_path = Some(file_path.to_path_buf());

        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.read()?;

        if let Some(log_level) = config.get("log_level") {
            LogLevel::parse(log_level)
                .map_err(|e| DomainError::ConfigurationError(e.to_string()))?;
        }

        if let Some(log_format) = config.get("log_format") {
            LogFormat::parse(log_format)
                .map_err(|e| DomainError::ConfigurationError(e.to_string()))?;
        }

        for key in ["viewport_width", "viewport_height", "error_excerpt_len"] {
            if let Some(value) = config.get(key) {
                parse_positive(key, value)?;
            }
        }

        for key in ["ffmpeg_path", "ffprobe_path"] {
            if config.get(key).map(|v| v.trim().is_empty()).unwrap_or(true) {
                return Err(DomainError::ConfigurationError(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        if let Some(output_dir) = config.get("output_dir") {
            if output_dir.trim().is_empty() {
                return Err(DomainError::ConfigurationError(
                    "output_dir must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError> {
        let config = self.read()?;
        let mut keys: Vec<String> = config.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
