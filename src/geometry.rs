// Host contract: the geometry reads and render writes the controller needs
// from the item, viewport and track elements it drives.

use std::fmt;

/// A selectable entry laid out on the track.
pub trait TimelineItem {
    /// Left edge of the item relative to the track, in pixels.
    fn offset_left(&self) -> Option<f64>;
    /// Rendered width of the item, in pixels.
    fn width(&self) -> Option<f64>;
    /// Toggle the active visual marker. Only the controller calls this.
    fn set_active(&mut self, active: bool);
}

/// The visible window the track scrolls behind.
pub trait Viewport {
    /// Visible width in pixels.
    fn width(&self) -> Option<f64>;
    fn set_cursor(&mut self, cursor: Cursor);
}

/// The horizontally translated strip holding the items.
pub trait Track {
    /// Total content width in pixels (including overflow).
    fn content_width(&self) -> Option<f64>;
    fn apply_transform(&mut self, transform: TrackTransform);
}

/// Cursor affordance shown on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    /// Value for the CSS `cursor` property.
    pub fn css_value(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Horizontal translation of the track. Vertically the track is always
/// centered on its own height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackTransform {
    pub x: f64,
}

impl fmt::Display for TrackTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateX({}px) translateY(-50%)", self.x)
    }
}

/// Viewport and track widths read at one instant.
///
/// Construction fails on zero, negative or non-finite widths, which is how
/// the controller recognises an element that has not been laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub viewport_width: f64,
    pub track_width: f64,
}

impl Geometry {
    pub fn new(viewport_width: f64, track_width: f64) -> Option<Self> {
        if !is_usable_width(viewport_width) || !is_usable_width(track_width) {
            return None;
        }
        Some(Self {
            viewport_width,
            track_width,
        })
    }

    /// Read both widths from the host elements.
    pub fn read<V: Viewport + ?Sized, T: Track + ?Sized>(viewport: &V, track: &T) -> Option<Self> {
        Self::new(viewport.width()?, track.content_width()?)
    }

    /// Whether the content fits inside the viewport (nothing to scroll).
    pub fn fits(&self) -> bool {
        self.track_width <= self.viewport_width
    }

    /// Left-most allowed position: the track's right edge meets the viewport's.
    pub fn min_position(&self) -> f64 {
        if self.fits() {
            0.0
        } else {
            -(self.track_width - self.viewport_width)
        }
    }
}

fn is_usable_width(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

/// Offset and width of one item, both required for centering.
pub(crate) fn item_extent<I: TimelineItem + ?Sized>(item: &I) -> Option<(f64, f64)> {
    let offset = item.offset_left().filter(|v| v.is_finite())?;
    let width = item.width().filter(|v| v.is_finite() && *v >= 0.0)?;
    Some((offset, width))
}
