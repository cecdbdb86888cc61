// Pointer input abstraction: mouse and touch events reduced to one sample
// type so the gesture logic has a single code path.

pub mod gesture;

/// Which physical input produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Mouse,
    Touch,
}

/// A pointer event reduced to what the controller needs: where along the
/// horizontal axis it happened, and from which input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub kind: InputKind,
    /// Client x in pixels. `None` when the event carried no usable coordinate.
    pub x: Option<f64>,
}

impl PointerSample {
    pub fn new(kind: InputKind, x: Option<f64>) -> Self {
        Self { kind, x }
    }

    pub fn mouse(x: f64) -> Self {
        Self::new(InputKind::Mouse, Some(x))
    }

    pub fn touch(x: f64) -> Self {
        Self::new(InputKind::Touch, Some(x))
    }

    /// The x coordinate, if present and finite. Handlers no-op on `None`.
    pub fn coordinate(&self) -> Option<f64> {
        self.x.filter(|x| x.is_finite())
    }
}
