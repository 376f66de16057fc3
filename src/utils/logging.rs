//! Logging configuration and batch progress reporting

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;
use crate::domain::model::BatchProgress;
use crate::ports::LogLevel;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                format_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Global log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include target module information
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            target: false,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Stderr subscriber for messages emitted while configuration loads
    ///
    /// Only `--log-level` and `RUST_LOG` are known at that point.
    pub fn bootstrap(level: Option<&str>) -> tracing::Dispatch {
        let level = level
            .and_then(|l| LogLevel::parse(l).ok())
            .unwrap_or(LoggingConfig::default().level);
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        tracing::Dispatch::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .finish(),
        )
    }

    /// Install the global subscriber, writing to stderr
    ///
    /// `RUST_LOG`, when set, overrides the configured level.
    pub fn initialize(&self) -> Result<(), DomainError> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_str()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.config.target)
            .with_writer(std::io::stderr);

        let result = match self.config.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        result.map_err(|e| {
            DomainError::ConfigurationError(format!("Failed to initialize logging: {}", e))
        })?;

        tracing::debug!(
            level = self.config.level.as_str(),
            format = self.config.format.as_str(),
            "Logging system initialized"
        );
        Ok(())
    }

    /// Log system information
    pub fn log_system_info(&self) {
        tracing::info!("=== BatchCrop ===");
        tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
        tracing::debug!("Logging level: {:?}", self.config.level);
        tracing::debug!("Output format: {:?}", self.config.format);
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

/// Logs batch progress events as they arrive
pub struct ProgressReporter {
    start_time: Option<Instant>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    /// Render one progress line, `None` for events that print nothing
    pub fn describe(event: &BatchProgress) -> Option<String> {
        match event {
            BatchProgress::Started { total } => Some(format!("Exporting {} item(s)", total)),
            BatchProgress::ItemStarted { index, total, item } => {
                Some(format!("[{}/{}] Processing {}", index + 1, total, item))
            }
            BatchProgress::ItemFinished { outcome, .. } if outcome.success => None,
            BatchProgress::ItemFinished { outcome, .. } => Some(format!(
                "Failed {}: {}",
                outcome.item,
                outcome.error.as_deref().unwrap_or("unknown error")
            )),
            BatchProgress::Finished { succeeded, failed } => Some(format!(
                "Batch complete: {} succeeded, {} failed",
                succeeded, failed
            )),
        }
    }

    pub fn report(&mut self, event: &BatchProgress) {
        if matches!(event, BatchProgress::Started { .. }) {
            self.start_time = Some(Instant::now());
        }

        let Some(mut message) = Self::describe(event) else {
            return;
        };

        match event {
            BatchProgress::ItemFinished { .. } => tracing::warn!("{}", message),
            BatchProgress::Finished { .. } => {
                if let Some(start_time) = self.start_time.take() {
                    message.push_str(&format!(" in {:.2}s", start_time.elapsed().as_secs_f64()));
                }
                tracing::info!("{}", message);
            }
            _ => tracing::info!("{}", message),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
