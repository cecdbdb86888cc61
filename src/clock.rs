// Time source for double-tap detection, injectable so tests can control
// the interval between taps.

use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds since an arbitrary fixed epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock: `Date.now()` in the browser, `SystemTime` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    fn now_ms(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}
