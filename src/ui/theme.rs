//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Ten-colour categorical palette for cloud words, cycled by rank.
pub const CATEGORY10: [Color; 10] = [
    Color::Rgb(0x1f, 0x77, 0xb4),
    Color::Rgb(0xff, 0x7f, 0x0e),
    Color::Rgb(0x2c, 0xa0, 0x2c),
    Color::Rgb(0xd6, 0x27, 0x28),
    Color::Rgb(0x94, 0x67, 0xbd),
    Color::Rgb(0x8c, 0x56, 0x4b),
    Color::Rgb(0xe3, 0x77, 0xc2),
    Color::Rgb(0x7f, 0x7f, 0x7f),
    Color::Rgb(0xbc, 0xbd, 0x22),
    Color::Rgb(0x17, 0xbe, 0xcf),
];

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub fn palette(index: usize) -> Color {
        CATEGORY10[index % CATEGORY10.len()]
    }

    // ── results ────────────────────────────────────────────────
    pub fn word_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn number_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn bar_style() -> Style {
        Style::default().fg(Color::Rgb(0x4a, 0x6f, 0xa5))
    }

    pub fn bar_hover_style() -> Style {
        Style::default().fg(Color::Rgb(0x4f, 0xc3, 0xf7))
    }

    pub fn axis_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn hint_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }
}
