// Track position state: clamping, centering formulas, and drag tracking.

use crate::geometry::{Geometry, TrackTransform};

/// Clamp a candidate track offset into `[min_position, 0]`.
///
/// When the content is narrower than the viewport the range collapses and
/// the result is always 0. Non-finite candidates also land on 0.
pub fn clamp_position(candidate: f64, geometry: &Geometry) -> f64 {
    if !candidate.is_finite() || geometry.fits() {
        return 0.0;
    }
    // `+ 0.0` folds -0.0 into 0.0 so the rendered transform never reads "-0px".
    candidate.max(geometry.min_position()).min(0.0) + 0.0
}

/// Unclamped offset that puts the middle of the content in the middle of
/// the viewport.
pub fn content_center_position(geometry: &Geometry) -> f64 {
    -(geometry.track_width - geometry.viewport_width) / 2.0
}

/// Unclamped offset that puts the middle of an item in the middle of the
/// viewport.
pub fn item_center_position(item_offset: f64, item_width: f64, viewport_width: f64) -> f64 {
    -(item_offset - viewport_width / 2.0 + item_width / 2.0)
}

/// Where a drag began: pointer x and track offset at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragStart {
    x: f64,
    position: f64,
}

/// Horizontal offset of the track plus the in-progress drag, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackScroll {
    position: f64,
    drag: Option<DragStart>,
}

impl TrackScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current track offset in pixels (0 = content left edge at viewport left edge).
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer x recorded at drag start, while a drag is in progress.
    pub fn drag_origin_x(&self) -> Option<f64> {
        self.drag.map(|d| d.x)
    }

    /// Track offset recorded at drag start, while a drag is in progress.
    pub fn drag_origin_position(&self) -> Option<f64> {
        self.drag.map(|d| d.position)
    }

    /// Transform for the current position.
    pub fn transform(&self) -> TrackTransform {
        TrackTransform { x: self.position }
    }

    /// Move to `candidate`, clamped. Returns the stored position.
    pub fn set_clamped(&mut self, candidate: f64, geometry: &Geometry) -> f64 {
        self.position = clamp_position(candidate, geometry);
        self.position
    }

    /// Center the whole content in the viewport.
    pub fn center_content(&mut self, geometry: &Geometry) -> f64 {
        self.set_clamped(content_center_position(geometry), geometry)
    }

    /// Center an item with the given offset and width in the viewport.
    pub fn center_on(&mut self, item_offset: f64, item_width: f64, geometry: &Geometry) -> f64 {
        let candidate = item_center_position(item_offset, item_width, geometry.viewport_width);
        self.set_clamped(candidate, geometry)
    }

    /// Begin a drag at pointer `x`. Restarting an in-progress drag rebases it.
    pub fn begin_drag(&mut self, x: f64) {
        self.drag = Some(DragStart {
            x,
            position: self.position,
        });
    }

    /// Follow the pointer to `x`. Returns the new position, or `None` when no
    /// drag is in progress.
    pub fn update_drag(&mut self, x: f64, geometry: &Geometry) -> Option<f64> {
        let start = self.drag?;
        Some(self.set_clamped(start.position + (x - start.x), geometry))
    }

    /// End the drag. Returns whether one was in progress.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }
}
