//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    fs::write(file.path(), contents).unwrap();
    file
}

#[test]
fn default_config_path_names_sitemotion() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("sitemotion") && path_str.ends_with("config.toml"));
    }
}

#[test]
fn default_log_path_ends_with_log_file() {
    assert!(default_log_path()
        .to_string_lossy()
        .ends_with("sitemotion.log"));
}

#[test]
fn missing_file_is_not_an_error() {
    assert_eq!(load_config_file("/nonexistent/sitemotion/config.toml"), Ok(None));
}

#[test]
fn parses_every_section() {
    let file = write_config(
        r#"
pin_breakpoint_px = 1024
card_gap_px = 24
default_slider_mode = "wrapping"
log_file_path = "/tmp/site.log"

[header]
hide_after = 200
reveal_delta = 30

[drag]
min_threshold_px = 50
threshold_ratio = 0.2

[sliders.photoSlider]
mode = "bounded"
"#,
    );
    let config = load_config_file(file.path()).unwrap().unwrap();
    assert_eq!(config.pin_breakpoint_px, Some(1024.0));
    assert_eq!(config.default_slider_mode, Some(TransitionMode::Wrapping));
    assert_eq!(
        config.sliders.get("photoSlider").map(|s| s.mode),
        Some(TransitionMode::Bounded)
    );

    let resolved = merge_config(Some(config));
    assert_eq!(resolved.card_gap_px, 24.0);
    assert_eq!(resolved.hysteresis.hide_after, 200.0);
    assert_eq!(resolved.hysteresis.reveal_delta, 30.0);
    // unset header fields keep defaults
    assert_eq!(resolved.hysteresis.jitter_band, 6.0);
    assert_eq!(resolved.drag.min_px, 50.0);
    assert_eq!(resolved.log_file_path, PathBuf::from("/tmp/site.log"));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config("theme = \"dark\"\n");
    assert!(matches!(
        load_config_file(file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn unknown_slider_mode_is_rejected() {
    let file = write_config("default_slider_mode = \"loop\"\n");
    assert!(matches!(
        load_config_file(file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn negative_pixels_are_rejected() {
    let file = write_config("[header]\njitter_band = -3\n");
    assert_eq!(
        load_config_file(file.path()).unwrap_err(),
        ConfigError::InvalidValue {
            field: "header.jitter_band".to_string(),
            reason: "-3 is not a non-negative pixel count".to_string(),
        }
    );
}

#[test]
fn ratio_above_one_is_rejected() {
    let file = write_config("[drag]\nthreshold_ratio = 1.5\n");
    assert!(matches!(
        load_config_file(file.path()),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn merge_without_file_gives_defaults() {
    let resolved = merge_config(None);
    assert_eq!(resolved.pin_breakpoint_px, 980.0);
    assert_eq!(resolved.card_gap_px, 18.0);
    assert_eq!(resolved.default_slider_mode, TransitionMode::Bounded);
    assert!(resolved.slider_modes.is_empty());
}

#[test]
fn page_options_carry_resolved_values() {
    let mut resolved = ResolvedConfig::default();
    resolved.pin_breakpoint_px = 700.0;
    resolved
        .slider_modes
        .insert("quotes".to_string(), TransitionMode::Wrapping);
    let options = resolved.page_options();
    assert_eq!(options.breakpoint, 700.0);
    assert_eq!(
        options.slider_mode(Some("quotes"), Some("bounded")),
        TransitionMode::Wrapping
    );
    assert_eq!(options.year, None);
}

#[test]
#[serial]
fn env_config_path_is_used_when_no_explicit_path() {
    let file = write_config("pin_breakpoint_px = 720\n");
    env::set_var(CONFIG_ENV, file.path());
    let loaded = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV);
    assert_eq!(loaded.unwrap().unwrap().pin_breakpoint_px, Some(720.0));
}

#[test]
#[serial]
fn explicit_path_beats_env_path() {
    let env_file = write_config("pin_breakpoint_px = 720\n");
    let cli_file = write_config("pin_breakpoint_px = 640\n");
    env::set_var(CONFIG_ENV, env_file.path());
    let loaded = load_config_with_precedence(Some(cli_file.path().to_path_buf()));
    env::remove_var(CONFIG_ENV);
    assert_eq!(loaded.unwrap().unwrap().pin_breakpoint_px, Some(640.0));
}

#[test]
#[serial]
fn breakpoint_env_overrides_file() {
    env::set_var(BREAKPOINT_ENV, "1100");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(BREAKPOINT_ENV);
    assert_eq!(config.unwrap().pin_breakpoint_px, 1100.0);
}

#[test]
#[serial]
fn malformed_breakpoint_env_is_an_error() {
    env::set_var(BREAKPOINT_ENV, "wide");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(BREAKPOINT_ENV);
    assert!(matches!(config, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial]
fn cli_breakpoint_wins_over_env_and_file() {
    let file = write_config("pin_breakpoint_px = 720\n");
    env::set_var(BREAKPOINT_ENV, "1100");
    let resolved = resolve(Some(file.path().to_path_buf()), Some(600.0));
    env::remove_var(BREAKPOINT_ENV);
    assert_eq!(resolved.unwrap().pin_breakpoint_px, 600.0);
}

#[test]
fn cli_without_flags_changes_nothing() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None), base);
}
