//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    pub const CONTROL: Color = Color::Cyan;
    pub const ACTION: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const GROUP: Color = Color::Yellow;
    pub const RATING: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default().fg(Theme::FG)
    }

    /// Title bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor.
    pub fn selected() -> Style {
        Style::default().bg(Theme::SELECTED_BG)
    }

    /// Cell under the cursor.
    pub fn cursor() -> Style {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    /// Editable cell.
    pub fn control() -> Style {
        Style::default()
            .fg(Theme::CONTROL)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn rating() -> Style {
        Style::default().fg(Theme::RATING)
    }

    pub fn action() -> Style {
        Style::default()
            .fg(Theme::ACTION)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Theme::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Select group title.
    pub fn group_header() -> Style {
        Style::default()
            .fg(Theme::GROUP)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Empty-body placeholder.
    pub fn placeholder() -> Style {
        Style::default()
            .fg(Theme::FG_DIM)
            .add_modifier(Modifier::ITALIC)
    }

    /// Help line key hint.
    pub fn help_key() -> Style {
        Style::default()
            .fg(Theme::CONTROL)
            .add_modifier(Modifier::BOLD)
    }

    /// Swatch color for a `#rrggbb` value.
    pub fn swatch(hex: &str) -> Option<Style> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Style::default().fg(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_parses_hex() {
        assert_eq!(
            Styles::swatch("#ff8000"),
            Some(Style::default().fg(Color::Rgb(255, 128, 0)))
        );
        assert_eq!(Styles::swatch("ff8000"), None);
        assert_eq!(Styles::swatch("#fff"), None);
        assert_eq!(Styles::swatch("#gg0000"), None);
    }
}
