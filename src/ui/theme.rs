//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};

/// Color and style theme for the dashboard.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for the header title.
    pub highlight: Color,
    /// Color of graph bars.
    pub bar: Color,
    /// Color for errors and non-zero error counters.
    pub critical: Color,
    /// Style for section labels ("Thunderbolt Status:", "Current Values:").
    pub label: Style,
    /// Style for the footer hint.
    pub footer: Style,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            bar: Color::Green,
            critical: Color::Red,
            label: Style::default().add_modifier(Modifier::BOLD),
            footer: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            bar: Color::Green,
            critical: Color::Red,
            label: Style::default().add_modifier(Modifier::BOLD),
            footer: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for an error counter: plain at zero, red and bold otherwise.
    pub fn error_count_style(&self, errors: u64) -> Style {
        if errors > 0 {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    pub fn bar_style(&self) -> Style {
        Style::default().fg(self.bar)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
