//! Parrot/neon theme tokens for the LogSlider TUI
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, selection bar)
//! - **Positive**: Neon green (handle being dragged)
//! - **Warning**: Neon orange (status warnings)
//! - **Negative**: Hot pink (errors)
//! - **Neutral**: Cool purple (handles at rest)
//! - **Muted**: Steel blue (empty track, hints)

use ratatui::style::{Color, Modifier, Style};

/// Parrot/neon theme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Handle color: dragged, focused for keyboard nudging, or at rest.
    pub fn handle_color(&self, dragging: bool, focused: bool) -> Color {
        if dragging {
            self.positive
        } else if focused {
            self.accent
        } else {
            self.neutral
        }
    }
}

const THEME: Theme = Theme {
    background: Color::Rgb(18, 18, 20),
    accent: Color::Rgb(0, 255, 255),
    positive: Color::Rgb(0, 255, 128),
    negative: Color::Rgb(255, 20, 147),
    warning: Color::Rgb(255, 140, 0),
    neutral: Color::Rgb(147, 112, 219),
    muted: Color::Rgb(100, 149, 237),
    text_primary: Color::White,
    text_secondary: Color::Rgb(170, 170, 170),
};

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn handle(dragging: bool, focused: bool) -> Style {
    Style::default()
        .fg(THEME.handle_color(dragging, focused))
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        Style::default().fg(THEME.text_secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_handle_color() {
        let theme = Theme::default();
        assert_eq!(theme.handle_color(true, true), theme.positive);
        assert_eq!(theme.handle_color(false, true), theme.accent);
        assert_eq!(theme.handle_color(false, false), theme.neutral);
    }

    #[test]
    fn test_const_theme_matches_default() {
        assert_eq!(THEME.accent, Theme::default().accent);
        assert_eq!(THEME.muted, Theme::default().muted);
    }
}
