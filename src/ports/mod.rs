// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::store::CropSettingsStore;
use async_trait::async_trait;

/// Port for reading frame dimensions of a media item
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Native size of the first video stream
    async fn probe_frame_size(&self, file_path: &Path) -> Result<FrameSize, DomainError>;
}

/// Port for the external transcoding tool
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Check the tool can be started; returns its version banner
    async fn check_available(&self) -> Result<String, DomainError>;

    /// Run one crop job to completion
    async fn crop(&self, job: &CropJob) -> Result<(), DomainError>;
}

/// Port for locating media files and preparing output locations
#[async_trait]
pub trait MediaSourcePort: Send + Sync {
    /// Candidate media files directly inside a folder, sorted by name
    async fn list_media(&self, dir_path: &Path) -> Result<Vec<MediaItem>, DomainError>;

    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;
}

/// Port for persisting crop settings between runs
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Load a saved store, `None` when no session exists yet
    async fn load_session(&self, file_path: &Path)
        -> Result<Option<CropSettingsStore>, DomainError>;

    /// Save the store for the given input folder
    async fn save_session(
        &self,
        file_path: &Path,
        input_dir: &Path,
        store: &CropSettingsStore,
    ) -> Result<(), DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Get configuration value with default
    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Get all configuration keys
    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
