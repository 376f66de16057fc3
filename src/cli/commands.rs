//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::app::edit_interactor::{EditRequest, SetRequest};
use crate::app::export_interactor::{CropRequest, ExportRequest};
use crate::cli::args::{
    CropArgs, EditArgs, ExportArgs, InspectArgs, ListArgs, SetArgs, ViewportArgs,
};
use crate::cli::script::parse_gestures;
use crate::config_initialization::CropperConfig;
use crate::domain::editor::EditorFeedback;
use crate::domain::model::{CropRect, FrameSize};
use crate::utils::{PathUtils, ProgressReporter};

fn session_path(input_dir: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathUtils::default_session_path(input_dir))
}

fn viewport(args: ViewportArgs, config: &CropperConfig) -> (u32, u32) {
    (
        args.viewport_width.unwrap_or(config.viewport_width),
        args.viewport_height.unwrap_or(config.viewport_height),
    )
}

fn parse_rect(value: &str) -> Result<CropRect> {
    CropRect::parse(value).with_context(|| format!("Invalid crop rectangle '{}'", value))
}

/// Execute the list command
pub async fn list(container: &dyn AppContainer, args: ListArgs) -> Result<()> {
    info!("Listing media in {}", args.input.display());
    let session = session_path(&args.input, args.session);

    let items = container
        .inspect_interactor()
        .list(&args.input, &session)
        .await
        .context("Failed to list media items")?;

    if args.json {
        let json = serde_json::to_string_pretty(&items)
            .context("Failed to serialize media list to JSON")?;
        println!("{}", json);
    } else if items.is_empty() {
        println!("No media files found in {}", args.input.display());
    } else {
        for listed in &items {
            println!("{}", listed.summary());
        }
    }
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(
    container: &dyn AppContainer,
    config: &CropperConfig,
    args: InspectArgs,
) -> Result<()> {
    let (width, height) = viewport(args.viewport, config);
    let response = container
        .inspect_interactor()
        .inspect(&args.input, width, height, args.json)
        .await
        .context("Failed to inspect input file")?;

    print!("{}", response.summary);
    if args.json {
        println!();
    }
    Ok(())
}

/// Execute the edit command
pub async fn edit(
    container: &dyn AppContainer,
    config: &CropperConfig,
    args: EditArgs,
) -> Result<()> {
    let source = args
        .source
        .as_deref()
        .map(FrameSize::parse)
        .transpose()
        .context("Invalid --source frame size")?;
    let events = match args.gestures.as_deref() {
        Some(script) => parse_gestures(script).context("Invalid gesture script")?,
        None => Vec::new(),
    };

    let request = EditRequest {
        session_path: session_path(&args.input, args.session),
        input_dir: args.input,
        item: args.item,
        source,
        viewport: Some(viewport(args.viewport, config)),
        events,
        reset: args.reset,
    };

    let response = container
        .edit_interactor()
        .edit(request)
        .await
        .context("Failed to edit crop region")?;

    for feedback in &response.feedback {
        if let EditorFeedback::Cursor(hit, cursor) = feedback {
            println!("hover: {:?} ({})", hit, cursor);
        }
    }

    let mapping = &response.mapping;
    println!(
        "{} {} -> preview {}x{}",
        response.item, response.frame, mapping.display_width, mapping.display_height
    );
    println!("{}", response.crop_info);
    if response.commits == 0 {
        warn!("No crop committed for {}", response.item);
    }
    Ok(())
}

/// Execute the set command
pub async fn set(container: &dyn AppContainer, args: SetArgs) -> Result<()> {
    let rect = parse_rect(&args.rect)?;
    let request = SetRequest {
        session_path: session_path(&args.input, args.session),
        input_dir: args.input,
        item: args.item,
        rect,
    };
    let item = request.item.clone();

    let stored = container
        .edit_interactor()
        .set(request)
        .await
        .context("Failed to store crop rectangle")?;

    if stored {
        println!("Stored crop for {}: {}", item, rect);
    } else {
        println!("Nothing stored for {}: rectangle has no area", item);
    }
    Ok(())
}

/// Execute the crop command
pub async fn crop(
    container: &dyn AppContainer,
    config: &CropperConfig,
    args: CropArgs,
) -> Result<()> {
    let rect = parse_rect(&args.rect)?;
    let request = CropRequest {
        input: args.input,
        rect,
        output_dir: args.output.or_else(|| config.output_dir.clone()),
    };

    let outcome = container
        .export_interactor()
        .crop(request)
        .await
        .context("Failed to crop video")?;

    println!("Saved {}", outcome.output_path.display());
    Ok(())
}

/// Execute the export command
pub async fn export(
    container: &dyn AppContainer,
    config: &CropperConfig,
    args: ExportArgs,
) -> Result<()> {
    let uniform = args.uniform.as_deref().map(parse_rect).transpose()?;
    let request = ExportRequest {
        session_path: session_path(&args.input, args.session),
        output_dir: args.output.or_else(|| config.output_dir.clone()),
        input_dir: args.input,
        uniform,
    };

    let mut reporter = ProgressReporter::new();
    let report = container
        .export_interactor()
        .export(request, |event| reporter.report(event))
        .await
        .context("Batch export failed")?;
    info!("Batch finished: {} item(s) processed", report.total());

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize batch report to JSON")?;
        println!("{}", json);
    } else {
        for outcome in &report.outcomes {
            match &outcome.error {
                None => println!("ok    {} -> {}", outcome.item, outcome.output_path.display()),
                Some(error) => println!("fail  {}: {}", outcome.item, error),
            }
        }
        println!(
            "Batch processing complete! Success: {}, Failed: {}",
            report.succeeded, report.failed
        );
    }
    Ok(())
}
