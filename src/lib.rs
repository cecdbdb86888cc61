// Horizontally scrollable timeline: drag to scroll, tap to select, double-tap
// or close button to deselect, with the active item kept centered.
//
// The controller is platform independent and drives its elements through the
// traits in `geometry`. The `web` feature adds the DOM implementation.

pub mod clock;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod input;
pub mod scroll;
pub mod selection;

#[cfg(feature = "web")]
pub mod web;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, TimelineConfig};
pub use controller::{GestureOutcome, TimelineController};
pub use geometry::{Cursor, Geometry, TimelineItem, Track, TrackTransform, Viewport};
pub use input::{InputKind, PointerSample};
