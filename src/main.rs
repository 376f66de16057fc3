//! BatchCrop CLI
//!
//! Define a crop rectangle per video in a folder, then crop them all with FFmpeg.
//!
//! # Usage
//!
//! ```bash
//! batchcrop list --in ./videos
//! batchcrop edit --in ./videos --item clip.mp4 --gestures "down 40,30; drag 400,300; up 400,300"
//! batchcrop set --in ./videos --item other.mov --rect 0,140,1920,800
//! batchcrop export --in ./videos --out ./videos/cropped
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::instrument::WithSubscriber;

use batchcrop_cli::app::container::DefaultAppContainer;
use batchcrop_cli::cli::{commands, Cli, Commands};
use batchcrop_cli::config_initialization::initialize_configuration_hierarchy;
use batchcrop_cli::utils::{LoggingConfig, LoggingSystem};

/// Main entry point for the BatchCrop CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Config loading logs through a temporary subscriber until the real one is known
    let (config_adapter, config) = initialize_configuration_hierarchy(&cli)
        .with_subscriber(LoggingSystem::bootstrap(cli.log_level.as_deref()))
        .await?;

    // Initialize logging
    let logging = LoggingSystem::new(LoggingConfig {
        level: config.log_level,
        format: config.log_format,
        ..LoggingConfig::default()
    });
    logging.initialize()?;
    logging.log_system_info();

    let container = DefaultAppContainer::new(config_adapter, &config);

    // Execute the requested command
    match cli.command {
        Commands::List(args) => {
            info!("Executing list command");
            commands::list(&container, args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(&container, &config, args).await?;
        }
        Commands::Edit(args) => {
            info!("Executing edit command");
            commands::edit(&container, &config, args).await?;
        }
        Commands::Set(args) => {
            info!("Executing set command");
            commands::set(&container, args).await?;
        }
        Commands::Crop(args) => {
            info!("Executing crop command");
            commands::crop(&container, &config, args).await?;
        }
        Commands::Export(args) => {
            info!("Executing export command");
            commands::export(&container, &config, args).await?;
        }
    }

    Ok(())
}
