//! Text input pane.
//!
//! The buffer is append-only from the keyboard (typing, Enter, Backspace,
//! paste), so the view simply follows the end of the text.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use super::theme::Theme;

const PLACEHOLDER: &str = "Type or paste text here, or load the sample.";

pub struct InputWidget<'a> {
    pub text: &'a str,
    pub focused: bool,
    pub block: Block<'a>,
}

/// Hard-wrap `text` to `width` columns, keeping explicit line breaks.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let chars: Vec<char> = raw.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.text.is_empty() {
            let mut spans = vec![Span::styled(PLACEHOLDER, Theme::hint_style())];
            if self.focused {
                spans.insert(0, Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)));
            }
            buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
            return;
        }

        // Leave one column for the cursor.
        let lines = wrap_lines(self.text, inner.width.saturating_sub(1) as usize);
        let height = inner.height as usize;
        let skip = lines.len().saturating_sub(height);

        for (i, text) in lines.iter().skip(skip).enumerate() {
            let y = inner.y + i as u16;
            let mut spans = vec![Span::styled(text.as_str(), Theme::word_style())];
            let is_last = skip + i + 1 == lines.len();
            if is_last && self.focused {
                spans.push(Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)));
            }
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
        }
    }
}
