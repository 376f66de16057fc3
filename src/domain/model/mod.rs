// Domain models - Core types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Largest magnitude accepted for a display-space coordinate
pub const MAX_DISPLAY_COORD: i32 = 16_384;
/// Largest magnitude accepted for a source-space rectangle component
pub const MAX_SOURCE_COORD: i32 = i32::MAX / 4;

/// Crop rectangle in source-space pixels, top-left origin
///
/// `x` and `y` can become negative after a move; nothing clamps a rectangle to
/// the frame. A width or height of zero or less means no crop has been defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CropRect {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The identity crop covering a whole frame
    pub fn full_frame(frame: FrameSize) -> Self {
        Self::new(0, 0, frame.width as i32, frame.height as i32)
    }

    /// A rectangle with no area has nothing to hit and nothing to crop
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Parse `X,Y,W,H`
    pub fn parse(rect_str: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = rect_str.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(DomainError::BadArgs(format!(
                "Invalid rectangle '{}'. Expected X,Y,WIDTH,HEIGHT",
                rect_str
            )));
        }

        let mut values = [0i32; 4];
        for (slot, part) in values.iter_mut().zip(parts.iter()) {
            *slot = part.parse::<i32>().map_err(|_| {
                DomainError::BadArgs(format!("Invalid rectangle component '{}'", part))
            })?;
        }

        let [x, y, width, height] = values;
        if values.iter().any(|v| v.unsigned_abs() > MAX_SOURCE_COORD as u32) {
            return Err(DomainError::BadArgs(format!(
                "Rectangle components must be within +/-{}",
                MAX_SOURCE_COORD
            )));
        }
        if width < 0 || height < 0 {
            return Err(DomainError::BadArgs(
                "Rectangle width and height cannot be negative".to_string(),
            ));
        }

        Ok(Self::new(x, y, width, height))
    }
}

impl FromStr for CropRect {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={}, y={}, width={}, height={}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Native frame dimensions of a media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size, rejecting empty frames
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::BadArgs(
                "Frame dimensions cannot be zero".to_string(),
            ));
        }
        Ok(Self { width, height })
    }

    /// Parse `WIDTHxHEIGHT`
    pub fn parse(size_str: &str) -> Result<Self, DomainError> {
        let (w, h) = size_str
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| {
                DomainError::BadArgs(format!(
                    "Invalid size '{}'. Expected WIDTHxHEIGHT",
                    size_str
                ))
            })?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid width '{}'", w)))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid height '{}'", h)))?;
        Self::new(width, height)
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pointer position on the rendered preview surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

impl DisplayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel position in the native media frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePoint {
    pub x: i32,
    pub y: i32,
}

/// Crop rectangle scaled into display space for drawing and hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DisplayRect {
    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Strict interior containment; points on the border are outside
    pub fn strictly_contains(&self, point: DisplayPoint) -> bool {
        self.left() < point.x
            && point.x < self.right()
            && self.top() < point.y
            && point.y < self.bottom()
    }
}

/// Mapping between a fitted preview and its source frame
///
/// `scale_x` and `scale_y` are tracked separately because rounding the
/// display size can make them differ slightly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportMapping {
    pub source_width: u32,
    pub source_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ViewportMapping {
    /// Identity mapping, one display pixel per source pixel
    pub fn identity(frame: FrameSize) -> Self {
        Self {
            source_width: frame.width,
            source_height: frame.height,
            display_width: frame.width,
            display_height: frame.height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Hit zone of a rectangle under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitKind {
    None,
    Move,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HitKind {
    /// Resize handle for this zone, if it is one
    pub fn handle(&self) -> Option<ResizeHandle> {
        match self {
            HitKind::None | HitKind::Move => None,
            HitKind::Top => Some(ResizeHandle::Top),
            HitKind::Bottom => Some(ResizeHandle::Bottom),
            HitKind::Left => Some(ResizeHandle::Left),
            HitKind::Right => Some(ResizeHandle::Right),
            HitKind::TopLeft => Some(ResizeHandle::TopLeft),
            HitKind::TopRight => Some(ResizeHandle::TopRight),
            HitKind::BottomLeft => Some(ResizeHandle::BottomLeft),
            HitKind::BottomRight => Some(ResizeHandle::BottomRight),
        }
    }

    /// Pointer cursor to show while hovering this zone
    pub fn cursor(&self) -> CursorHint {
        match self {
            HitKind::None => CursorHint::Default,
            HitKind::Move => CursorHint::Move,
            HitKind::Left | HitKind::Right => CursorHint::ResizeHorizontal,
            HitKind::Top | HitKind::Bottom => CursorHint::ResizeVertical,
            HitKind::TopLeft | HitKind::BottomRight => CursorHint::ResizeNwSe,
            HitKind::TopRight | HitKind::BottomLeft => CursorHint::ResizeNeSw,
        }
    }
}

/// One of the eight resize zones of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight
        )
    }
}

/// Cursor feedback for hover positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Move,
    ResizeHorizontal,
    ResizeVertical,
    ResizeNwSe,
    ResizeNeSw,
}

impl fmt::Display for CursorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CursorHint::Default => "default",
            CursorHint::Move => "move",
            CursorHint::ResizeHorizontal => "ew-resize",
            CursorHint::ResizeVertical => "ns-resize",
            CursorHint::ResizeNwSe => "nwse-resize",
            CursorHint::ResizeNeSw => "nesw-resize",
        };
        f.write_str(name)
    }
}

/// Transient state of a pointer drag
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    DrawingNew {
        anchor: DisplayPoint,
    },
    Moving {
        anchor: DisplayPoint,
        anchor_rect: CropRect,
    },
    Resizing {
        handle: ResizeHandle,
        anchor: DisplayPoint,
        anchor_rect: CropRect,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}

/// Pointer event fed to the editor by whatever surface drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press(DisplayPoint),
    Drag(DisplayPoint),
    Release(DisplayPoint),
    Hover(DisplayPoint),
}

/// A candidate media file in the input folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable key, the file name
    pub id: String,
    pub path: PathBuf,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

/// A fully resolved transcoder invocation for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropJob {
    pub item: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rect: CropRect,
}

/// Result of exporting one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOutcome {
    pub item: String,
    pub output_path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Aggregate result of a batch export
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Progress event emitted while a batch runs
#[derive(Debug, Clone, PartialEq)]
pub enum BatchProgress {
    Started { total: usize },
    ItemStarted { index: usize, total: usize, item: String },
    ItemFinished { index: usize, outcome: ItemOutcome },
    Finished { succeeded: usize, failed: usize },
}

#[cfg(test)]
mod tests;
