//! Display/source coordinate mapping for a fitted preview frame

use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// Viewport width used before the preview surface has been laid out
pub const FALLBACK_VIEWPORT_WIDTH: u32 = 640;
/// Viewport height used before the preview surface has been laid out
pub const FALLBACK_VIEWPORT_HEIGHT: u32 = 360;

/// Converts points and rectangles between display and source space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    mapping: ViewportMapping,
}

impl CoordinateMapper {
    pub fn new(mapping: ViewportMapping) -> Self {
        Self { mapping }
    }

    /// Fit a frame into a viewport and build a mapper for the result
    pub fn fitted(
        source_width: u32,
        source_height: u32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Result<Self, DomainError> {
        fit_to_viewport(source_width, source_height, viewport_width, viewport_height)
            .map(Self::new)
    }

    pub fn mapping(&self) -> &ViewportMapping {
        &self.mapping
    }

    /// Display point to source point, flooring each axis. No clamping.
    pub fn to_source(&self, point: DisplayPoint) -> SourcePoint {
        SourcePoint {
            x: (point.x as f64 * self.mapping.scale_x).floor() as i32,
            y: (point.y as f64 * self.mapping.scale_y).floor() as i32,
        }
    }

    /// Source rectangle to display rectangle, truncating toward zero
    pub fn to_display(&self, rect: &CropRect) -> DisplayRect {
        let sx = self.mapping.scale_x;
        let sy = self.mapping.scale_y;
        DisplayRect {
            x: (rect.x as f64 / sx) as i32,
            y: (rect.y as f64 / sy) as i32,
            width: (rect.width as f64 / sx) as i32,
            height: (rect.height as f64 / sy) as i32,
        }
    }

    /// Scale a display-space delta into source units
    pub fn scale_delta(&self, dx: i32, dy: i32) -> (i32, i32) {
        (
            (dx as f64 * self.mapping.scale_x) as i32,
            (dy as f64 * self.mapping.scale_y) as i32,
        )
    }

    /// Convert a display-space length threshold into source units per axis
    pub fn source_threshold(&self, display_pixels: f64) -> (f64, f64) {
        (
            display_pixels * self.mapping.scale_x,
            display_pixels * self.mapping.scale_y,
        )
    }
}

/// Largest aspect-preserving display size for a frame inside a viewport
///
/// A viewport dimension of 1 or less means the surface has not been laid out
/// yet; the fallback size is substituted for that axis.
pub fn fit_to_viewport(
    source_width: u32,
    source_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> Result<ViewportMapping, DomainError> {
    if source_width == 0 || source_height == 0 {
        return Err(DomainError::BadArgs(format!(
            "Cannot fit an empty {}x{} frame into a viewport",
            source_width, source_height
        )));
    }

    let viewport_width = if viewport_width <= 1 {
        FALLBACK_VIEWPORT_WIDTH
    } else {
        viewport_width
    };
    let viewport_height = if viewport_height <= 1 {
        FALLBACK_VIEWPORT_HEIGHT
    } else {
        viewport_height
    };

    let sw = source_width as f64;
    let sh = source_height as f64;
    let source_aspect = sw / sh;
    let viewport_aspect = viewport_width as f64 / viewport_height as f64;

    let (display_width, display_height) = if viewport_aspect > source_aspect {
        // Viewport is proportionally wider: height binds
        let width = (viewport_height as f64 * sw / sh).round().max(1.0) as u32;
        (width, viewport_height)
    } else {
        let height = (viewport_width as f64 * sh / sw).round().max(1.0) as u32;
        (viewport_width, height)
    };

    Ok(ViewportMapping {
        source_width,
        source_height,
        display_width,
        display_height,
        scale_x: sw / display_width as f64,
        scale_y: sh / display_height as f64,
    })
}
