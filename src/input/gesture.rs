// Tap/drag disambiguation: decides whether a release on an item was a tap
// or the tail end of a drag.

use super::{InputKind, PointerSample};
use crate::config::GestureConfig;

/// Displacement at or beyond which a release counts as a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    pub touch_px: f64,
    pub click_px: f64,
}

impl DragThresholds {
    /// Threshold for the given input. Touch jitters more between press and
    /// release than a mouse click, so it gets the looser bound.
    pub fn for_kind(&self, kind: InputKind) -> f64 {
        match kind {
            InputKind::Touch => self.touch_px,
            InputKind::Mouse => self.click_px,
        }
    }
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

impl From<&GestureConfig> for DragThresholds {
    fn from(config: &GestureConfig) -> Self {
        Self {
            touch_px: config.touch_threshold_px,
            click_px: config.click_threshold_px,
        }
    }
}

/// Gesture phase between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No pointer held.
    Idle,
    /// Pointer held since `origin_x`; not yet known to be a tap or a drag.
    Pending { kind: InputKind, origin_x: f64 },
}

/// How a release on an item was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Tap,
    Drag,
}

/// Classifies item releases against the press that started the gesture.
///
/// The browser delivers `click` after `mouseup`, by which point the gesture
/// has already ended. The origin of a finished mouse gesture is therefore
/// kept until one release consumes it, the next press replaces it, or the
/// owner forgets it. Touch releases on items arrive before the gesture ends,
/// so a finished touch gesture keeps nothing.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
    finished_origin_x: Option<f64>,
    thresholds: DragThresholds,
}

impl GestureTracker {
    pub fn new(thresholds: DragThresholds) -> Self {
        Self {
            state: GestureState::Idle,
            finished_origin_x: None,
            thresholds,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, GestureState::Pending { .. })
    }

    /// Press. Returns false (and changes nothing) when the sample has no
    /// usable coordinate.
    pub fn on_press(&mut self, sample: PointerSample) -> bool {
        let Some(x) = sample.coordinate() else {
            return false;
        };
        self.state = GestureState::Pending {
            kind: sample.kind,
            origin_x: x,
        };
        self.finished_origin_x = None;
        true
    }

    /// End of gesture (release, cancel, pointer left). Returns whether a
    /// gesture was pending.
    pub fn on_end(&mut self) -> bool {
        match self.state {
            GestureState::Pending { kind, origin_x } => {
                self.finished_origin_x = (kind == InputKind::Mouse).then_some(origin_x);
                self.state = GestureState::Idle;
                true
            }
            GestureState::Idle => false,
        }
    }

    /// Drop the origin of a finished gesture so later releases measure no
    /// displacement.
    pub fn forget_finished(&mut self) {
        self.finished_origin_x = None;
    }

    /// Where the current (or just finished) gesture started.
    pub fn origin_x(&self) -> Option<f64> {
        match self.state {
            GestureState::Pending { origin_x, .. } => Some(origin_x),
            GestureState::Idle => self.finished_origin_x,
        }
    }

    /// Horizontal distance between `x` and the gesture origin. Zero when no
    /// gesture origin is known (e.g. a keyboard-activated click).
    pub fn displacement(&self, x: f64) -> f64 {
        self.origin_x().map_or(0.0, |origin| (x - origin).abs())
    }

    /// Classify a release on an item. Returns `None` when the sample has no
    /// usable coordinate. A finished gesture's origin is consumed by the
    /// first release that reads it.
    pub fn classify(&mut self, release: PointerSample) -> Option<Resolution> {
        let x = release.coordinate()?;
        let displacement = self.displacement(x);
        if !self.is_pending() {
            self.finished_origin_x = None;
        }
        let threshold = self.thresholds.for_kind(release.kind);
        if displacement >= threshold {
            Some(Resolution::Drag)
        } else {
            Some(Resolution::Tap)
        }
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DragThresholds::default())
    }
}
