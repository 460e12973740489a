//! Configuration file loading with precedence handling.

use crate::page::PageOptions;
use crate::state::{
    DragThreshold, HysteresisConfig, TransitionMode, CARD_GAP_PX, PIN_BREAKPOINT_PX,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SITEMOTION_CONFIG";

/// Environment variable overriding the pinned-track breakpoint.
pub const BREAKPOINT_ENV: &str = "SITEMOTION_BREAKPOINT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending key.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything unset keeps its default.
/// Corresponds to `~/.config/sitemotion/config.toml`.
///
/// ```toml
/// pin_breakpoint_px = 980
/// default_slider_mode = "bounded"
///
/// [header]
/// hide_after = 160
///
/// [sliders.photoSlider]
/// mode = "wrapping"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Width at or below which the pinned track is disabled.
    #[serde(default)]
    pub pin_breakpoint_px: Option<f64>,

    /// Gap between pinned cards.
    #[serde(default)]
    pub card_gap_px: Option<f64>,

    /// Header hysteresis thresholds.
    #[serde(default)]
    pub header: Option<HeaderSection>,

    /// Drag commit threshold.
    #[serde(default)]
    pub drag: Option<DragSection>,

    /// Slider policy when the markup names none.
    #[serde(default)]
    pub default_slider_mode: Option<TransitionMode>,

    /// Per-slider overrides keyed by element id.
    #[serde(default)]
    pub sliders: HashMap<String, SliderSection>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// `[header]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeaderSection {
    /// Positions above this always show the header.
    #[serde(default)]
    pub top_dead_zone: Option<f64>,
    /// Moves smaller than this are ignored.
    #[serde(default)]
    pub jitter_band: Option<f64>,
    /// Downward scrolling hides only below this position.
    #[serde(default)]
    pub hide_after: Option<f64>,
    /// Upward delta needed to reveal.
    #[serde(default)]
    pub reveal_delta: Option<f64>,
}

/// `[drag]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DragSection {
    /// Threshold floor in pixels.
    #[serde(default)]
    pub min_threshold_px: Option<f64>,
    /// Threshold as a fraction of the slider width.
    #[serde(default)]
    pub threshold_ratio: Option<f64>,
}

/// `[sliders.<id>]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SliderSection {
    /// Transition policy for this slider.
    pub mode: TransitionMode,
}

impl ConfigFile {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut checks: Vec<(&str, Option<f64>)> = vec![
            ("pin_breakpoint_px", self.pin_breakpoint_px),
            ("card_gap_px", self.card_gap_px),
        ];
        if let Some(h) = &self.header {
            checks.extend([
                ("header.top_dead_zone", h.top_dead_zone),
                ("header.jitter_band", h.jitter_band),
                ("header.hide_after", h.hide_after),
                ("header.reveal_delta", h.reveal_delta),
            ]);
        }
        if let Some(d) = &self.drag {
            checks.push(("drag.min_threshold_px", d.min_threshold_px));
            if let Some(ratio) = d.threshold_ratio {
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(ConfigError::InvalidValue {
                        field: "drag.threshold_ratio".to_string(),
                        reason: format!("{ratio} is outside 0..=1"),
                    });
                }
            }
        }
        for (field, value) in checks {
            if let Some(v) = value {
                check_pixels(field, v)?;
            }
        }
        Ok(())
    }
}

fn check_pixels(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{value} is not a non-negative pixel count"),
        })
    }
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Pinned-track breakpoint.
    pub pin_breakpoint_px: f64,
    /// Pinned card gap.
    pub card_gap_px: f64,
    /// Header thresholds.
    pub hysteresis: HysteresisConfig,
    /// Drag threshold.
    pub drag: DragThreshold,
    /// Default slider policy.
    pub default_slider_mode: TransitionMode,
    /// Per-slider policies.
    pub slider_modes: HashMap<String, TransitionMode>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            pin_breakpoint_px: PIN_BREAKPOINT_PX,
            card_gap_px: CARD_GAP_PX,
            hysteresis: HysteresisConfig::default(),
            drag: DragThreshold::default(),
            default_slider_mode: TransitionMode::default(),
            slider_modes: HashMap::new(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Controller tunables for binding a page.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            breakpoint: self.pin_breakpoint_px,
            card_gap: self.card_gap_px,
            hysteresis: self.hysteresis,
            drag: self.drag,
            default_slider_mode: self.default_slider_mode,
            slider_modes: self.slider_modes.clone(),
            year: None,
        }
    }
}

/// Default log file path: `~/.local/state/sitemotion/sitemotion.log` on
/// Unix-like systems, the current directory when no state dir exists.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("sitemotion").join("sitemotion.log"),
        None => PathBuf::from("sitemotion.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read, parsed, or holds
/// out-of-range values.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    config.validate()?;

    Ok(Some(config))
}

/// Default config file path: `~/.config/sitemotion/config.toml` on Unix.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sitemotion").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SITEMOTION_CONFIG` environment variable
/// 3. Default path `~/.config/sitemotion/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be loaded.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let header = config.header.unwrap_or_default();
    let drag = config.drag.unwrap_or_default();

    ResolvedConfig {
        pin_breakpoint_px: config
            .pin_breakpoint_px
            .unwrap_or(defaults.pin_breakpoint_px),
        card_gap_px: config.card_gap_px.unwrap_or(defaults.card_gap_px),
        hysteresis: HysteresisConfig {
            top_dead_zone: header
                .top_dead_zone
                .unwrap_or(defaults.hysteresis.top_dead_zone),
            jitter_band: header
                .jitter_band
                .unwrap_or(defaults.hysteresis.jitter_band),
            hide_after: header.hide_after.unwrap_or(defaults.hysteresis.hide_after),
            reveal_delta: header
                .reveal_delta
                .unwrap_or(defaults.hysteresis.reveal_delta),
        },
        drag: DragThreshold {
            min_px: drag.min_threshold_px.unwrap_or(defaults.drag.min_px),
            ratio: drag.threshold_ratio.unwrap_or(defaults.drag.ratio),
        },
        default_slider_mode: config
            .default_slider_mode
            .unwrap_or(defaults.default_slider_mode),
        slider_modes: config
            .sliders
            .into_iter()
            .map(|(id, section)| (id, section.mode))
            .collect(),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// Checks `SITEMOTION_BREAKPOINT` for the pinned-track breakpoint.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when the variable is set but is not a
/// non-negative number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(BREAKPOINT_ENV) {
        let value: f64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: BREAKPOINT_ENV.to_string(),
            reason: format!("{raw:?} is not a number"),
        })?;
        check_pixels(BREAKPOINT_ENV, value)?;
        config.pin_breakpoint_px = value;
    }
    Ok(config)
}

/// Apply CLI argument overrides; these take precedence over everything.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, breakpoint: Option<f64>) -> ResolvedConfig {
    if let Some(px) = breakpoint {
        config.pin_breakpoint_px = px;
    }
    config
}

/// Run the whole precedence chain.
///
/// # Errors
///
/// Propagates file and environment errors.
pub fn resolve(
    config_path: Option<PathBuf>,
    breakpoint: Option<f64>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file);
    let with_env = apply_env_overrides(merged)?;
    Ok(apply_cli_overrides(with_env, breakpoint))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
