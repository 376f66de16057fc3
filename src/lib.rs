//! BatchCrop Library
//!
//! Interactive crop-region editing for a folder of videos and batch cropping
//! through the external `ffmpeg` tool.
//!
//! The core is [`domain::mapper::CoordinateMapper`], which maps between the
//! preview surface and the source frame, and [`domain::editor::CropRegionEditor`],
//! which turns pointer gestures into a crop rectangle. [`app::BatchController`]
//! keeps one committed rectangle per item and exports them.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::BatchController;
pub use domain::editor::CropRegionEditor;
pub use domain::errors::DomainError;
pub use domain::mapper::{fit_to_viewport, CoordinateMapper};
pub use domain::model::{CropRect, FrameSize, ViewportMapping};
