//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

/// Largest preview dimension accepted on the command line
const MAX_VIEWPORT: u32 = 16384;

fn viewport_dimension(s: &str) -> Result<u32, String> {
    number_range(s, 1, MAX_VIEWPORT)
}

/// Preview surface size; the configured viewport when omitted
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ViewportArgs {
    /// Preview surface width in pixels
    #[arg(long, value_parser = viewport_dimension)]
    pub viewport_width: Option<u32>,

    /// Preview surface height in pixels
    #[arg(long, value_parser = viewport_dimension)]
    pub viewport_height: Option<u32>,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Input folder
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Session file (default: <input>/.batchcrop-session.json)
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long = "in")]
    pub input: PathBuf,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Input folder
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Item (file name) to edit
    #[arg(long)]
    pub item: String,

    /// Frame size as WxH, skipping ffprobe
    #[arg(long)]
    pub source: Option<String>,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    /// Gesture script, e.g. "down 10,10; drag 200,120; up 200,120"
    #[arg(short, long, conflicts_with = "reset")]
    pub gestures: Option<String>,

    /// Reset the crop to the full frame
    #[arg(long)]
    pub reset: bool,

    /// Session file (default: <input>/.batchcrop-session.json)
    #[arg(long)]
    pub session: Option<PathBuf>,
}

/// Arguments for the set command
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Input folder
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Item (file name) to update
    #[arg(long)]
    pub item: String,

    /// Crop rectangle as X,Y,W,H in source pixels
    #[arg(short, long)]
    pub rect: String,

    /// Session file (default: <input>/.batchcrop-session.json)
    #[arg(long)]
    pub session: Option<PathBuf>,
}

/// Arguments for the crop command
#[derive(Args, Debug)]
pub struct CropArgs {
    /// Input video file path
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Crop rectangle as X,Y,W,H in source pixels
    #[arg(short, long)]
    pub rect: String,

    /// Output folder (default: <input folder>/cropped)
    #[arg(short, long = "out")]
    pub output: Option<PathBuf>,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input folder
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Output folder (default: <input>/cropped)
    #[arg(short, long = "out")]
    pub output: Option<PathBuf>,

    /// Apply one rectangle X,Y,W,H to every item before exporting
    #[arg(short, long)]
    pub uniform: Option<String>,

    /// Session file (default: <input>/.batchcrop-session.json)
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
