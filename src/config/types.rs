use serde::Deserialize;
use std::path::Path;

/// Top-level timeline configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineConfig {
    pub gesture: GestureConfig,
    pub selectors: SelectorsConfig,
    pub appearance: AppearanceConfig,
}

/// Tap/drag disambiguation tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Touch releases displaced at least this far from the press are drags.
    pub touch_threshold_px: f64,
    /// Clicks displaced at least this far from the press are drags.
    pub click_threshold_px: f64,
    /// Two taps on the active item closer than this close it.
    pub double_tap_window_ms: f64,
}

/// CSS selectors used by the DOM binding to find its elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorsConfig {
    pub wrapper: String,
    pub track: String,
    pub item: String,
    pub close: String,
}

/// Visual markers written by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceConfig {
    pub active_class: String,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

const DEFAULT_TOUCH_THRESHOLD_PX: f64 = 15.0;
const DEFAULT_CLICK_THRESHOLD_PX: f64 = 5.0;
const DEFAULT_DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

const DEFAULT_CONFIG_TOML: &str = r#"[gesture]
touch_threshold_px = 15.0
click_threshold_px = 5.0
double_tap_window_ms = 300.0

[selectors]
wrapper = ".timeline-wrapper"
track = ".timeline"
item = "li"
close = ".close-btn"

[appearance]
active_class = "active"
"#;

// ── Serde intermediate structs (unknown keys ignored) ──────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    gesture: RawGestureConfig,
    selectors: RawSelectorsConfig,
    appearance: RawAppearanceConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawGestureConfig {
    touch_threshold_px: f64,
    click_threshold_px: f64,
    double_tap_window_ms: f64,
}

impl Default for RawGestureConfig {
    fn default() -> Self {
        let gesture = GestureConfig::default();
        Self {
            touch_threshold_px: gesture.touch_threshold_px,
            click_threshold_px: gesture.click_threshold_px,
            double_tap_window_ms: gesture.double_tap_window_ms,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSelectorsConfig {
    wrapper: String,
    track: String,
    item: String,
    close: String,
}

impl Default for RawSelectorsConfig {
    fn default() -> Self {
        let selectors = SelectorsConfig::default();
        Self {
            wrapper: selectors.wrapper,
            track: selectors.track,
            item: selectors.item,
            close: selectors.close,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawAppearanceConfig {
    active_class: String,
}

impl Default for RawAppearanceConfig {
    fn default() -> Self {
        Self {
            active_class: AppearanceConfig::default().active_class,
        }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_threshold_px: DEFAULT_TOUCH_THRESHOLD_PX,
            click_threshold_px: DEFAULT_CLICK_THRESHOLD_PX,
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
        }
    }
}

impl Default for SelectorsConfig {
    fn default() -> Self {
        Self {
            wrapper: ".timeline-wrapper".to_string(),
            track: ".timeline".to_string(),
            item: "li".to_string(),
            close: ".close-btn".to_string(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            active_class: "active".to_string(),
        }
    }
}

impl From<RawConfig> for TimelineConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            gesture: GestureConfig {
                touch_threshold_px: raw.gesture.touch_threshold_px,
                click_threshold_px: raw.gesture.click_threshold_px,
                double_tap_window_ms: raw.gesture.double_tap_window_ms,
            },
            selectors: SelectorsConfig {
                wrapper: raw.selectors.wrapper,
                track: raw.selectors.track,
                item: raw.selectors.item,
                close: raw.selectors.close,
            },
            appearance: AppearanceConfig {
                active_class: raw.appearance.active_class,
            },
        }
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl TimelineConfig {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = Self::from(raw);
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document (e.g. a `data-` attribute) into a config.
    /// Same section layout as the TOML form.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = Self::from(raw);
        config.validate()?;
        Ok(config)
    }

    /// The default configuration rendered as TOML.
    pub fn print_default() -> &'static str {
        DEFAULT_CONFIG_TOML
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gesture = &self.gesture;
        for (name, value) in [
            ("touch_threshold_px", gesture.touch_threshold_px),
            ("click_threshold_px", gesture.click_threshold_px),
            ("double_tap_window_ms", gesture.double_tap_window_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a finite number > 0, got {value}"
                )));
            }
        }

        let selectors = &self.selectors;
        for (name, value) in [
            ("wrapper", &selectors.wrapper),
            ("track", &selectors.track),
            ("item", &selectors.item),
            ("close", &selectors.close),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "selector '{name}' must not be empty"
                )));
            }
        }

        let class = &self.appearance.active_class;
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "active_class must be a single non-empty class name, got '{class}'"
            )));
        }

        Ok(())
    }
}
