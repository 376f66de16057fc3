//! Crop-region editor: hit-testing and the press/drag/release state machine
//!
//! The editor owns one rectangle (the current item's) in source space and
//! receives pointer positions in display space. Every drag update is
//! recomputed from the anchor captured on press, so repeating an update with
//! the same pointer position yields the same rectangle.

use crate::domain::mapper::CoordinateMapper;
use crate::domain::model::*;

/// Smallest crop edge a drag may produce, in display pixels
pub const MIN_CROP_SIZE: i32 = 10;
/// Distance from an edge that still counts as grabbing it, in display pixels
pub const EDGE_MARGIN: f64 = 8.0;

/// What the editor reports back for each pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorFeedback {
    /// Press started a gesture
    Began(GestureState),
    /// Drag recomputed the rectangle
    Updated(CropRect),
    /// Release finished the gesture; the rectangle is ready to commit
    Committed(CropRect),
    /// Release with no gesture in flight; nothing changed
    Ignored,
    /// Hover classified the pointer position
    Cursor(HitKind, CursorHint),
}

/// Interactive editor for a single crop rectangle
#[derive(Debug, Clone)]
pub struct CropRegionEditor {
    rect: CropRect,
    gesture: GestureState,
    mapper: CoordinateMapper,
    min_size: i32,
    margin: f64,
}

impl CropRegionEditor {
    /// Create an editor with an empty rectangle for the given viewport
    pub fn new(mapping: ViewportMapping) -> Self {
        Self {
            rect: CropRect::default(),
            gesture: GestureState::Idle,
            mapper: CoordinateMapper::new(mapping),
            min_size: MIN_CROP_SIZE,
            margin: EDGE_MARGIN,
        }
    }

    /// Start from an existing rectangle
    pub fn with_rect(mut self, rect: CropRect) -> Self {
        self.rect = rect;
        self
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn mapping(&self) -> &ViewportMapping {
        self.mapper.mapping()
    }

    /// Replace the viewport mapping after a resize or a new frame
    pub fn set_viewport(&mut self, mapping: ViewportMapping) {
        self.mapper = CoordinateMapper::new(mapping);
    }

    /// Load the rectangle of another item, dropping any gesture in flight
    pub fn load_rect(&mut self, rect: CropRect) {
        self.rect = rect;
        self.gesture = GestureState::Idle;
    }

    /// Rectangle in display space, as it would be drawn
    pub fn display_rect(&self) -> DisplayRect {
        self.mapper.to_display(&self.rect)
    }

    /// Classify a display-space point against the current rectangle
    pub fn classify_hit(&self, point: DisplayPoint) -> HitKind {
        if self.rect.is_degenerate() {
            return HitKind::None;
        }

        let r = self.display_rect();
        let on_left = distance_to_vertical(point, r.left(), r.top(), r.bottom()) < self.margin;
        let on_right = distance_to_vertical(point, r.right(), r.top(), r.bottom()) < self.margin;
        let on_top = distance_to_horizontal(point, r.top(), r.left(), r.right()) < self.margin;
        let on_bottom =
            distance_to_horizontal(point, r.bottom(), r.left(), r.right()) < self.margin;

        // Corners win over single edges
        if on_top && on_left {
            HitKind::TopLeft
        } else if on_top && on_right {
            HitKind::TopRight
        } else if on_bottom && on_left {
            HitKind::BottomLeft
        } else if on_bottom && on_right {
            HitKind::BottomRight
        } else if on_left {
            HitKind::Left
        } else if on_right {
            HitKind::Right
        } else if on_top {
            HitKind::Top
        } else if on_bottom {
            HitKind::Bottom
        } else if r.strictly_contains(point) {
            HitKind::Move
        } else {
            HitKind::None
        }
    }

    /// Cursor feedback for a hover position; never changes state
    pub fn hover(&self, point: DisplayPoint) -> CursorHint {
        self.classify_hit(point).cursor()
    }

    /// Pointer press: grab a handle, grab the body, or start a new rectangle
    pub fn begin_gesture(&mut self, point: DisplayPoint) -> GestureState {
        let hit = self.classify_hit(point);
        self.gesture = match (hit, hit.handle()) {
            (HitKind::Move, _) => GestureState::Moving {
                anchor: point,
                anchor_rect: self.rect,
            },
            (_, Some(handle)) => GestureState::Resizing {
                handle,
                anchor: point,
                anchor_rect: self.rect,
            },
            _ => {
                let origin = self.mapper.to_source(point);
                self.rect = CropRect::new(origin.x, origin.y, 0, 0);
                GestureState::DrawingNew { anchor: point }
            }
        };
        self.gesture
    }

    /// Pointer drag: recompute the rectangle from the anchor and current delta
    pub fn update_gesture(&mut self, point: DisplayPoint) -> CropRect {
        self.rect = match self.gesture {
            GestureState::Idle => self.rect,
            GestureState::DrawingNew { anchor } => self.drawn_rect(anchor, point),
            GestureState::Moving {
                anchor,
                anchor_rect,
            } => {
                let (dx, dy) = self.scaled_delta(anchor, point);
                CropRect::new(
                    anchor_rect.x.saturating_add(dx),
                    anchor_rect.y.saturating_add(dy),
                    anchor_rect.width,
                    anchor_rect.height,
                )
            }
            GestureState::Resizing {
                handle,
                anchor,
                anchor_rect,
            } => self.resized_rect(handle, anchor, anchor_rect, point),
        };
        self.rect
    }

    /// Pointer release: final update, back to idle, rectangle to commit
    pub fn end_gesture(&mut self, point: DisplayPoint) -> CropRect {
        if self.gesture.is_idle() {
            return self.rect;
        }
        let rect = self.update_gesture(point);
        self.gesture = GestureState::Idle;
        rect
    }

    /// Dispatch a pointer event to the matching entry point
    pub fn handle_event(&mut self, event: PointerEvent) -> EditorFeedback {
        match event {
            PointerEvent::Press(p) => EditorFeedback::Began(self.begin_gesture(p)),
            PointerEvent::Drag(p) => EditorFeedback::Updated(self.update_gesture(p)),
            PointerEvent::Release(_) if self.gesture.is_idle() => EditorFeedback::Ignored,
            PointerEvent::Release(p) => EditorFeedback::Committed(self.end_gesture(p)),
            PointerEvent::Hover(p) => {
                let hit = self.classify_hit(p);
                EditorFeedback::Cursor(hit, hit.cursor())
            }
        }
    }

    /// Reset to the identity crop of the whole frame
    pub fn reset_to_full_frame(&mut self, source_width: u32, source_height: u32) -> CropRect {
        self.rect = CropRect::new(0, 0, source_width as i32, source_height as i32);
        self.gesture = GestureState::Idle;
        self.rect
    }

    // New rectangles only grow down and to the right of the anchor
    fn drawn_rect(&self, anchor: DisplayPoint, point: DisplayPoint) -> CropRect {
        let origin = self.mapper.to_source(anchor);
        let width = point.x.saturating_sub(anchor.x).max(self.min_size);
        let height = point.y.saturating_sub(anchor.y).max(self.min_size);
        let mapping = self.mapper.mapping();
        CropRect::new(
            origin.x,
            origin.y,
            (width as f64 * mapping.scale_x).floor() as i32,
            (height as f64 * mapping.scale_y).floor() as i32,
        )
    }

    // An axis whose new size would not exceed the minimum keeps its previous value
    fn resized_rect(
        &self,
        handle: ResizeHandle,
        anchor: DisplayPoint,
        anchor_rect: CropRect,
        point: DisplayPoint,
    ) -> CropRect {
        let (dx, dy) = self.scaled_delta(anchor, point);
        let (min_width, min_height) = self.mapper.source_threshold(self.min_size as f64);
        let mut next = self.rect;

        if handle.moves_left() {
            let width = anchor_rect.width.saturating_sub(dx);
            if width as f64 > min_width {
                next.x = anchor_rect.x.saturating_add(dx);
                next.width = width;
            }
        }
        if handle.moves_right() {
            let width = anchor_rect.width.saturating_add(dx);
            if width as f64 > min_width {
                next.width = width;
            }
        }
        if handle.moves_top() {
            let height = anchor_rect.height.saturating_sub(dy);
            if height as f64 > min_height {
                next.y = anchor_rect.y.saturating_add(dy);
                next.height = height;
            }
        }
        if handle.moves_bottom() {
            let height = anchor_rect.height.saturating_add(dy);
            if height as f64 > min_height {
                next.height = height;
            }
        }

        next
    }

    fn scaled_delta(&self, anchor: DisplayPoint, point: DisplayPoint) -> (i32, i32) {
        self.mapper.scale_delta(
            point.x.saturating_sub(anchor.x),
            point.y.saturating_sub(anchor.y),
        )
    }
}

// Distance from a point to the vertical segment x = edge_x, y in [y0, y1]
fn distance_to_vertical(point: DisplayPoint, edge_x: i32, y0: i32, y1: i32) -> f64 {
    let dx = point.x as f64 - edge_x as f64;
    let dy = outside_span(point.y, y0, y1);
    dx.hypot(dy)
}

// Distance from a point to the horizontal segment y = edge_y, x in [x0, x1]
fn distance_to_horizontal(point: DisplayPoint, edge_y: i32, x0: i32, x1: i32) -> f64 {
    let dy = point.y as f64 - edge_y as f64;
    let dx = outside_span(point.x, x0, x1);
    dx.hypot(dy)
}

fn outside_span(value: i32, lo: i32, hi: i32) -> f64 {
    if value < lo {
        lo as f64 - value as f64
    } else if value > hi {
        value as f64 - hi as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests;
