//! Ranked word table with the live substring filter.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::app::state::ListState;
use crate::core::{model::AnalysisResult, table};

use super::theme::Theme;

/// The table widget: created fresh each frame.
pub struct TableWidget<'a> {
    result: &'a AnalysisResult,
    filter: &'a str,
    focused: bool,
    block: Option<Block<'a>>,
}

impl<'a> TableWidget<'a> {
    pub fn new(result: &'a AnalysisResult, filter: &'a str) -> Self {
        Self {
            result,
            filter,
            focused: false,
            block: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// Fixed column widths: rank, count, percentage.  The word gets the rest.
const RANK_W: usize = 5;
const COUNT_W: usize = 10;
const PCT_W: usize = 10;

fn row_line(rank: &str, word: &str, count: &str, pct: &str, word_w: usize) -> String {
    let word: String = word.chars().take(word_w).collect();
    format!("{rank:>RANK_W$}  {word:<word_w$}{count:>COUNT_W$}{pct:>PCT_W$}")
}

impl StatefulWidget for TableWidget<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.height < 3 || inner.width < 10 {
            return;
        }

        let word_w = (inner.width as usize).saturating_sub(RANK_W + 2 + COUNT_W + PCT_W).max(4);

        // Filter prompt.
        let prompt = if self.focused { "Filter [typing]: " } else { "Filter: " };
        let filter_line = Line::from(vec![
            Span::styled(prompt, Theme::number_style()),
            Span::styled(self.filter, Theme::header_style()),
        ]);
        buf.set_line(inner.x, inner.y, &filter_line, inner.width);

        let header = row_line("Rank", "Word", "Count", "Percent", word_w);
        buf.set_line(
            inner.x,
            inner.y + 1,
            &Line::from(Span::styled(header, Theme::header_style())),
            inner.width,
        );

        let rows = table::visible_rows(self.result, self.filter);
        let body = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);

        if rows.is_empty() {
            let msg = if self.result.is_empty() {
                "The service found no words."
            } else {
                "No words match the filter."
            };
            buf.set_line(body.x, body.y, &Line::from(Span::styled(msg, Theme::hint_style())), body.width);
            return;
        }

        state.clamp(rows.len());
        state.clamp_scroll(body.height as usize);

        let visible_rows = rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(body.height as usize);

        for (i, (idx, row)) in visible_rows.enumerate() {
            let text = row_line(
                &row.rank.to_string(),
                row.word,
                &table::group_thousands(row.count),
                &format!("{}%", row.percentage_text()),
                word_w,
            );
            let style = if idx == state.selected && self.focused {
                Theme::selected_style()
            } else {
                Theme::word_style()
            };
            buf.set_line(body.x, body.y + i as u16, &Line::from(Span::styled(text, style)), body.width);
        }
    }
}
