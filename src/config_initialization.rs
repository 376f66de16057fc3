//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::TomlConfigAdapter;
use crate::cli::Cli;
use crate::domain::errors::DomainError;
use crate::ports::{ConfigPort, LogLevel};
use crate::utils::LogFormat;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "batchcrop.toml";

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct CropperConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub error_excerpt_len: usize,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl CropperConfig {
    /// Read typed settings from a validated config port
    pub async fn from_port(port: &dyn ConfigPort) -> Result<Self, DomainError> {
        let get = move |key: &'static str| async move {
            port.get_config(key).await?.ok_or_else(|| {
                DomainError::ConfigurationError(format!("Missing config value: {}", key))
            })
        };
        let number = |key: &str, value: String| {
            value.parse::<u32>().map_err(|e| {
                DomainError::ConfigurationError(format!("Invalid {}: {}", key, e))
            })
        };

        Ok(Self {
            ffmpeg_path: PathBuf::from(get("ffmpeg_path").await?),
            ffprobe_path: PathBuf::from(get("ffprobe_path").await?),
            output_dir: port.get_config("output_dir").await?.map(PathBuf::from),
            viewport_width: number("viewport_width", get("viewport_width").await?)?,
            viewport_height: number("viewport_height", get("viewport_height").await?)?,
            error_excerpt_len: number("error_excerpt_len", get("error_excerpt_len").await?)?
                as usize,
            log_level: LogLevel::parse(&get("log_level").await?)?,
            log_format: LogFormat::parse(&get("log_format").await?)?,
        })
    }
}

/// Build configuration following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(
    cli: &Cli,
) -> Result<(TomlConfigAdapter, CropperConfig)> {
    // Step 1: Defaults
    let adapter = TomlConfigAdapter::new();

    // Step 2: Config file
    if let Some(path) = config_file_path(cli.config.as_deref()) {
        adapter
            .load_config(&path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    }

    // Step 3: Environment variables
    let env_overrides = adapter.apply_env_overrides(|name| std::env::var(name).ok())?;
    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }

    // Step 4: CLI arguments
    apply_cli_configuration_overrides(&adapter, cli).await?;

    adapter
        .validate_config()
        .await
        .context("Invalid configuration")?;
    let config = CropperConfig::from_port(&adapter).await?;
    Ok((adapter, config))
}

/// `--config` when given, otherwise `batchcrop.toml` if present
fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

/// Apply CLI argument overrides to configuration
async fn apply_cli_configuration_overrides(adapter: &TomlConfigAdapter, cli: &Cli) -> Result<()> {
    let overrides = [
        ("log_level", cli.log_level.clone()),
        ("log_format", cli.log_format.clone()),
        (
            "ffmpeg_path",
            cli.ffmpeg.as_ref().map(|p| p.to_string_lossy().to_string()),
        ),
        (
            "ffprobe_path",
            cli.ffprobe.as_ref().map(|p| p.to_string_lossy().to_string()),
        ),
    ];

    let mut cli_overrides = 0;
    for (key, value) in overrides {
        if let Some(value) = value {
            adapter.set_config(key, &value).await?;
            cli_overrides += 1;
        }
    }

    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }
    Ok(())
}
