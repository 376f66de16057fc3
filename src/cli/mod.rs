//! CLI module for BatchCrop
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;
pub mod script;

pub use args::{CropArgs, EditArgs, ExportArgs, InspectArgs, ListArgs, SetArgs};

/// BatchCrop
///
/// Define a crop region per video, then crop a whole folder with FFmpeg.
#[derive(Parser, Debug)]
#[command(name = "batchcrop")]
#[command(about = "BatchCrop - Per-file crop regions and batch video cropping")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file with a [batchcrop] table
    #[arg(long, global = true, env = "BATCHCROP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary
    #[arg(long, global = true)]
    pub ffprobe: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List media files in a folder with their saved crop
    List(ListArgs),
    /// Show a file's frame size and preview mapping
    Inspect(InspectArgs),
    /// Replay pointer gestures against an item's crop region
    Edit(EditArgs),
    /// Store a crop rectangle for an item
    Set(SetArgs),
    /// Crop a single file
    Crop(CropArgs),
    /// Crop every file with saved settings
    Export(ExportArgs),
}
