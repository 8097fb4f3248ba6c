//! Bar chart of the top-N words, drawn with block characters.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::{bar, model::WordCount};

use super::theme::Theme;

/// Partial-cell tops, in eighths.
const EIGHTHS: [&str; 8] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇"];

pub struct BarChartWidget<'a> {
    pub frequencies: &'a [WordCount],
    pub limit: usize,
    /// Highlighted bar (index into the displayed subset).
    pub selected: usize,
    pub block: Block<'a>,
}

impl Widget for BarChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width < 12 || inner.height < 6 {
            return;
        }

        let top = bar::top_n(self.frequencies, self.limit)
            .first()
            .map(|f| f.count as f64)
            .unwrap_or(0.0);
        // Row 0: hover readout.  Last two rows: axis line + word labels.
        let plot_height = inner.height.saturating_sub(3);
        let tick_count = (plot_height as usize / 3).max(2);
        let tick_values = bar::ticks(bar::nice_max(top), tick_count);
        let labels = bar::tick_labels(&tick_values);
        let axis_w = labels.iter().map(String::len).max().unwrap_or(1) as u16 + 2;

        let plot = Rect::new(
            inner.x + axis_w,
            inner.y + 1,
            inner.width.saturating_sub(axis_w),
            plot_height,
        );
        let chart = bar::layout(
            self.frequencies,
            self.limit,
            f64::from(plot.width),
            f64::from(plot.height),
            tick_count,
        );

        if chart.bars.is_empty() {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled("Nothing to chart.", Theme::hint_style())),
                inner.width,
            );
            return;
        }

        // ── y axis ─────────────────────────────────────────────
        let bottom = plot.y + plot.height;
        for y in plot.y..bottom {
            buf.set_string(plot.x - 1, y, "│", Theme::axis_style());
        }
        for (&tick, label) in tick_values.iter().zip(&labels) {
            let offset = chart.y_scale.y(tick).round() as u16;
            let y = (plot.y + offset).min(bottom - 1);
            let label = format!("{label:>w$}┤", w = (axis_w - 2) as usize);
            buf.set_string(inner.x, y, label, Theme::axis_style());
        }
        buf.set_string(
            plot.x - 1,
            bottom,
            format!("└{}", "─".repeat(plot.width as usize)),
            Theme::axis_style(),
        );

        // ── bars ───────────────────────────────────────────────
        let selected = self.selected.min(chart.bars.len() - 1);
        for (i, b) in chart.bars.iter().enumerate() {
            let x0 = plot.x + b.x.floor() as u16;
            let width = (b.width.floor() as u16).max(1);
            let style = if i == selected {
                Theme::bar_hover_style()
            } else {
                Theme::bar_style()
            };

            let eighths = (b.height * 8.0).round() as u32;
            let full = (eighths / 8) as u16;
            let part = (eighths % 8) as usize;
            for col in x0..(x0 + width).min(plot.x + plot.width) {
                for row in 0..full.min(plot.height) {
                    buf.set_string(col, bottom - 1 - row, "█", style);
                }
                if part > 0 && full < plot.height {
                    buf.set_string(col, bottom - 1 - full, EIGHTHS[part], style);
                }
            }

            // Word label under the bar, clipped to its band.
            let label: String = b.word.chars().take(width as usize).collect();
            let label_style = if i == selected {
                Theme::selected_style()
            } else {
                Theme::number_style()
            };
            buf.set_string(x0, bottom + 1, label, label_style);

            // Exact count above the highlighted bar.
            if i == selected {
                let text = b.count.to_string();
                let top = bottom - full.min(plot.height);
                let y = top.saturating_sub(1).max(inner.y);
                let tx = (x0 + width / 2).saturating_sub(text.len() as u16 / 2);
                buf.set_string(tx.max(plot.x), y, text, Theme::header_style());
            }
        }

        let b = &chart.bars[selected];
        buf.set_line(
            inner.x,
            inner.y,
            &Line::from(vec![
                Span::styled(format!("#{} ", selected + 1), Theme::number_style()),
                Span::styled(b.word, Theme::header_style()),
                Span::styled(format!("  {}", b.count), Theme::word_style()),
            ]),
            inner.width,
        );
    }
}
