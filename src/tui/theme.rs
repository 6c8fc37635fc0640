//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, group labels)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints, coordinates)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date/year label color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Revenue/money text color
    pub fn money(self) -> Color {
        match self {
            Self::Dark => Color::Magenta,
            Self::Light => Color::Indexed(90), // dark magenta (ANSI 256)
        }
    }

    /// Bar chart fill color
    pub fn bar(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }
}
