// Selection state: which item is active, and the tap timestamp used to
// detect a double tap on it.

use crate::geometry::TimelineItem;

/// How a tap on the already-active item resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    /// First tap of a potential pair.
    Single,
    /// Second tap inside the double-tap window.
    Double,
}

/// Single-active selection over a slice of items.
///
/// Invariant: when `active` is `Some(i)`, item `i` has its active flag set
/// and no other item does. All flag writes go through this type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    active: Option<usize>,
    /// Time of the last single tap on the active item, in milliseconds.
    last_tap_ms: Option<f64>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the active item, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn last_tap_ms(&self) -> Option<f64> {
        self.last_tap_ms
    }

    /// Make `index` the active item. Out-of-range indices are ignored and
    /// return false. Re-activating the current item is allowed.
    pub fn activate<I: TimelineItem>(&mut self, items: &mut [I], index: usize) -> bool {
        if index >= items.len() {
            return false;
        }
        if let Some(prev) = self.active {
            if let Some(item) = items.get_mut(prev) {
                item.set_active(false);
            }
        }
        items[index].set_active(true);
        self.active = Some(index);
        self.last_tap_ms = None;
        true
    }

    /// Deactivate the active item, if any. Returns the index that was active.
    pub fn clear<I: TimelineItem>(&mut self, items: &mut [I]) -> Option<usize> {
        let prev = self.active.take()?;
        if let Some(item) = items.get_mut(prev) {
            item.set_active(false);
        }
        self.last_tap_ms = None;
        Some(prev)
    }

    /// Record a tap on the active item at `now_ms`.
    ///
    /// A tap strictly less than `window_ms` after the previous single tap is a
    /// double tap; the pair is consumed. Otherwise the tap becomes the new
    /// first tap. A clock that moved backwards never yields a double tap.
    pub fn register_tap(&mut self, now_ms: f64, window_ms: f64) -> TapKind {
        let is_double = self
            .last_tap_ms
            .map(|last| now_ms - last)
            .is_some_and(|elapsed| (0.0..window_ms).contains(&elapsed));
        if is_double {
            self.last_tap_ms = None;
            TapKind::Double
        } else {
            self.last_tap_ms = Some(now_ms);
            TapKind::Single
        }
    }
}
