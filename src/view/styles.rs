//! Preview styling.

use ratatui::style::{Color, Modifier, Style};

/// Whether colors are enabled.
///
/// Disabled when the `NO_COLOR` environment variable is set to any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR`.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Colors on or off explicitly.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Styles for the preview panels.
#[derive(Debug, Clone, Copy)]
pub struct PreviewStyles {
    /// Border of the focused slider.
    pub focused: Style,
    /// Emphasized state (hidden header, open drawer, active dot).
    pub active: Style,
    /// Muted text (hints, inactive dots).
    pub muted: Style,
    /// Failed or skipped input.
    pub error: Style,
    /// Gauge fill.
    pub gauge: Style,
}

impl PreviewStyles {
    /// Styles for a color configuration. Without colors only modifiers remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused: Style::default().fg(Color::Cyan),
                active: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red),
                gauge: Style::default().fg(Color::Green).bg(Color::Black),
            }
        } else {
            Self {
                focused: Style::default().add_modifier(Modifier::BOLD),
                active: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().add_modifier(Modifier::DIM),
                error: Style::default().add_modifier(Modifier::REVERSED),
                gauge: Style::default(),
            }
        }
    }
}

impl Default for PreviewStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}
