//! Header line with totals and the view tabs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::{model::AnalysisResult, store::ViewMode, table::group_thousands};

use super::theme::Theme;

pub struct SummaryWidget<'a> {
    pub result: Option<&'a AnalysisResult>,
    pub view: ViewMode,
    pub remove_stopwords: bool,
    pub case_sensitive: bool,
    pub analyzed_at: Option<chrono::DateTime<chrono::Local>>,
}

impl Widget for SummaryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut totals = match self.result {
            Some(r) => vec![
                Span::styled("Total words: ", Theme::number_style()),
                Span::styled(group_thousands(r.word_count), Theme::header_style()),
                Span::styled("   Unique words: ", Theme::number_style()),
                Span::styled(group_thousands(r.unique_words), Theme::header_style()),
            ],
            None => vec![Span::styled("No analysis yet", Theme::hint_style())],
        };
        if let Some(at) = self.analyzed_at {
            totals.push(Span::styled(
                format!("   at {}", at.format("%H:%M:%S")),
                Theme::number_style(),
            ));
        }
        totals.push(Span::styled(
            format!(
                "   stopwords: {}  case: {}",
                if self.remove_stopwords { "removed" } else { "kept" },
                if self.case_sensitive { "sensitive" } else { "folded" },
            ),
            Theme::hint_style(),
        ));
        buf.set_line(area.x, area.y, &Line::from(totals), area.width);

        if area.height < 2 {
            return;
        }
        let mut tabs = Vec::new();
        for (i, &mode) in ViewMode::ALL.iter().enumerate() {
            tabs.push(Span::styled(
                format!(" {} {} ", i + 1, mode.label()),
                Theme::tab_style(mode == self.view),
            ));
            tabs.push(Span::raw(" "));
        }
        buf.set_line(area.x, area.y + 1, &Line::from(tabs), area.width);
    }
}
