// TimelineController: owns selection, position and gesture state for one
// timeline and turns host events into class, transform and cursor writes.

use crate::clock::{Clock, SystemClock};
use crate::config::TimelineConfig;
use crate::geometry::{item_extent, Cursor, Geometry, TimelineItem, Track, Viewport};
use crate::input::gesture::{DragThresholds, GestureState, GestureTracker, Resolution};
use crate::input::PointerSample;
use crate::scroll::{self, TrackScroll};
use crate::selection::{SelectionState, TapKind};

/// What an item release or close action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing happened (unknown item, missing coordinate).
    Ignored,
    /// The release ended a drag; selection unchanged.
    Drag,
    /// A tap made this item active.
    Selected(usize),
    /// A single tap on the already-active item; selection unchanged.
    Tapped(usize),
    /// This item was deactivated (double tap or close affordance).
    Closed(usize),
}

/// Interaction controller for one timeline.
///
/// All state is private and written only by the handlers below. Geometry is
/// read fresh from the collaborators on each positioning step, so layout
/// changes between events are picked up without notification (resize still
/// has to be reported to trigger recentering).
pub struct TimelineController<I, V, T, C = SystemClock> {
    items: Vec<I>,
    viewport: V,
    track: T,
    clock: C,
    config: TimelineConfig,
    scroll: TrackScroll,
    selection: SelectionState,
    gesture: GestureTracker,
}

impl<I, V, T, C> TimelineController<I, V, T, C>
where
    I: TimelineItem,
    V: Viewport,
    T: Track,
    C: Clock,
{
    /// Build a controller and render its initial state: first item active,
    /// track centered on it (or on the content midpoint when there are no
    /// items), grab cursor.
    pub fn new(items: Vec<I>, viewport: V, track: T, config: TimelineConfig, clock: C) -> Self {
        let thresholds = DragThresholds::from(&config.gesture);
        let mut controller = Self {
            items,
            viewport,
            track,
            clock,
            config,
            scroll: TrackScroll::new(),
            selection: SelectionState::new(),
            gesture: GestureTracker::new(thresholds),
        };

        for item in &mut controller.items {
            item.set_active(false);
        }
        if !controller.items.is_empty() {
            controller.selection.activate(&mut controller.items, 0);
        }
        controller.viewport.set_cursor(Cursor::Grab);
        controller.recenter_on_resize();

        log::debug!(
            "timeline initialised: {} items, active {:?}, position {}",
            controller.items.len(),
            controller.selection.active(),
            controller.scroll.position()
        );
        controller
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn position(&self) -> f64 {
        self.scroll.position()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.selection.active()
    }

    pub fn is_dragging(&self) -> bool {
        self.scroll.is_dragging()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn track(&self) -> &T {
        &self.track
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Hand the collaborators back, ending the controller's lifetime.
    pub fn into_parts(self) -> (Vec<I>, V, T) {
        (self.items, self.viewport, self.track)
    }

    fn geometry(&self) -> Option<Geometry> {
        let geometry = Geometry::read(&self.viewport, &self.track);
        if geometry.is_none() {
            log::trace!("timeline geometry unavailable, skipping positioning");
        }
        geometry
    }

    fn render(&mut self) {
        self.track.apply_transform(self.scroll.transform());
    }

    // ── Positioning ──────────────────────────────────────────────────

    /// Clamp `candidate` against the current geometry. Without geometry there
    /// is nothing to clamp against and finite candidates pass through.
    pub fn clamp_position(&self, candidate: f64) -> f64 {
        match self.geometry() {
            Some(geometry) => scroll::clamp_position(candidate, &geometry),
            None if candidate.is_finite() => candidate,
            None => 0.0,
        }
    }

    /// Center the content midpoint. Returns false when geometry is missing.
    fn center_content(&mut self) -> bool {
        let Some(geometry) = self.geometry() else {
            return false;
        };
        self.scroll.center_content(&geometry);
        self.render();
        true
    }

    /// Center the active item. Returns false when there is no active item or
    /// its geometry is missing.
    fn center_active(&mut self) -> bool {
        let Some(index) = self.selection.active() else {
            return false;
        };
        let Some(geometry) = self.geometry() else {
            return false;
        };
        let Some((offset, width)) = self.items.get(index).and_then(item_extent) else {
            log::trace!("timeline item {index} has no geometry, not centering");
            return false;
        };
        self.scroll.center_on(offset, width, &geometry);
        self.render();
        true
    }

    /// Recompute the position after the viewport changed size: content
    /// midpoint first, then the active item if there is one.
    pub fn recenter_on_resize(&mut self) {
        self.center_content();
        self.center_active();
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Make `index` the active item and center it. Re-selecting the active
    /// item recenters it. Returns false for an unknown index.
    pub fn set_active_item(&mut self, index: usize) -> bool {
        if !self.selection.activate(&mut self.items, index) {
            log::debug!("timeline: ignoring activation of unknown item {index}");
            return false;
        }
        log::debug!("timeline: item {index} active");
        self.center_active();
        true
    }

    /// Deactivate the active item, leaving the position where it is.
    pub fn clear_active_item(&mut self) -> Option<usize> {
        let cleared = self.selection.clear(&mut self.items);
        if let Some(index) = cleared {
            log::debug!("timeline: item {index} deactivated");
        }
        cleared
    }

    // ── Gestures ─────────────────────────────────────────────────────

    /// Press on the viewport (mouse-down / touch-start).
    pub fn on_gesture_start(&mut self, sample: PointerSample) {
        let Some(x) = sample.coordinate() else {
            return;
        };
        self.gesture.on_press(sample);
        self.scroll.begin_drag(x);
        self.viewport.set_cursor(Cursor::Grabbing);
    }

    /// Pointer moved over the viewport. Only acts while dragging.
    pub fn on_gesture_move(&mut self, sample: PointerSample) {
        if !self.scroll.is_dragging() {
            return;
        }
        let Some(x) = sample.coordinate() else {
            return;
        };
        let Some(geometry) = self.geometry() else {
            return;
        };
        if self.scroll.update_drag(x, &geometry).is_some() {
            self.render();
        }
    }

    /// Gesture over: release, cancel, or the pointer left the viewport.
    /// Safe to call any number of times.
    pub fn end_gesture(&mut self) {
        self.scroll.end_drag();
        self.gesture.on_end();
        self.viewport.set_cursor(Cursor::Grab);
    }

    /// Release on item `index` (touch-end on the item, or click).
    ///
    /// Classifies the release against where the gesture started, then ends
    /// the gesture. Drags leave the selection alone; taps select an inactive
    /// item, and on the active item either recenter it (first tap) or close
    /// it (second tap inside the double-tap window).
    pub fn on_item_release(&mut self, index: usize, sample: PointerSample) -> GestureOutcome {
        let resolution = self.gesture.classify(sample);
        self.end_gesture();
        self.gesture.forget_finished();

        if index >= self.items.len() {
            return GestureOutcome::Ignored;
        }
        match resolution {
            None => GestureOutcome::Ignored,
            Some(Resolution::Drag) => {
                log::debug!("timeline: release on item {index} was a drag");
                GestureOutcome::Drag
            }
            Some(Resolution::Tap) => self.tap_item(index),
        }
    }

    /// Item `index` activated without a pointer (keyboard, assistive
    /// technology). Always a tap; any finished gesture is ignored.
    pub fn on_item_activate(&mut self, index: usize) -> GestureOutcome {
        self.end_gesture();
        self.gesture.forget_finished();
        if index >= self.items.len() {
            return GestureOutcome::Ignored;
        }
        self.tap_item(index)
    }

    fn tap_item(&mut self, index: usize) -> GestureOutcome {
        if !self.selection.is_active(index) {
            self.set_active_item(index);
            return GestureOutcome::Selected(index);
        }

        let now = self.clock.now_ms();
        match self
            .selection
            .register_tap(now, self.config.gesture.double_tap_window_ms)
        {
            TapKind::Double => {
                self.clear_active_item();
                GestureOutcome::Closed(index)
            }
            TapKind::Single => {
                self.center_active();
                GestureOutcome::Tapped(index)
            }
        }
    }

    /// Close affordance on item `index` activated. Deactivates that item and
    /// clears the selection; an in-progress drag is left running.
    pub fn on_close(&mut self, index: usize) -> GestureOutcome {
        let Some(item) = self.items.get_mut(index) else {
            return GestureOutcome::Ignored;
        };
        item.set_active(false);
        self.clear_active_item();
        log::debug!("timeline: item {index} closed");
        GestureOutcome::Closed(index)
    }
}

impl<I, V, T> TimelineController<I, V, T, SystemClock>
where
    I: TimelineItem,
    V: Viewport,
    T: Track,
{
    /// Controller reading wall-clock time for double-tap detection.
    pub fn with_system_clock(items: Vec<I>, viewport: V, track: T, config: TimelineConfig) -> Self {
        Self::new(items, viewport, track, config, SystemClock)
    }
}
