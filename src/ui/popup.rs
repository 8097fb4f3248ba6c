//! Popup overlays: settings menu, controls submenu, and notifications.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

use super::theme::Theme;

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.state.settings_selected;
            let prefix = if selected { " ▸ " } else { "   " };
            let mut spans = vec![Span::styled(
                format!("{prefix}{:<22}", item.label()),
                row_style(selected),
            )];

            if let Some(value) = item.value(self.state) {
                let value_style = match value.as_str() {
                    "[ON]" => Style::default().fg(Color::Green),
                    "[OFF]" => Style::default().fg(Color::DarkGray),
                    _ => Style::default().fg(Color::Yellow),
                };
                spans.push(Span::styled(format!("  {value}"), value_style));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(56, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];

        for (i, &action) in Action::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let prefix = if selected { " ▸ " } else { "   " };

            let keys = if selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };

            let mut key_style = Style::default().fg(Color::Yellow);
            if selected {
                key_style = key_style.bg(Color::DarkGray);
                if self.awaiting_rebind {
                    key_style = key_style.add_modifier(Modifier::BOLD);
                }
            }

            // Label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<24}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);

            lines.push(Line::from(vec![
                Span::styled(label_col, row_style(selected)),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }

        let reset_selected = self.selected == Action::ALL.len();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{}⟳ Reset to defaults",
                if reset_selected { " ▸ " } else { "   " }
            ),
            row_style(reset_selected),
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── notification ──────

/// A message the user has to acknowledge.
pub struct NotificationPopup<'a> {
    pub message: &'a str,
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 60u16;
        let text_width = width.saturating_sub(4).max(1) as usize;
        let body_rows: usize = self
            .message
            .lines()
            .map(|l| l.chars().count().max(1).div_ceil(text_width))
            .sum();
        let height = body_rows as u16 + 5;
        let popup = centered_fixed(width, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Notice ").border_style(Theme::error_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = self
            .message
            .lines()
            .map(|l| Line::from(Span::styled(format!(" {l}"), Theme::word_style())))
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            " Enter: dismiss",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
