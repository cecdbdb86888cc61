// Timeline configuration: gesture thresholds, DOM selectors and appearance.

pub mod types;

pub use types::{AppearanceConfig, ConfigError, GestureConfig, SelectorsConfig, TimelineConfig};
