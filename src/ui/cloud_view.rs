//! Word cloud drawn into terminal cells.
//!
//! Layout units are mapped so the radius ceiling (plus the largest half-size)
//! fits the pane, with rows counted double because terminal cells are about
//! twice as tall as they are wide.  Rotations become directions: horizontal
//! for 0°, vertical for ±90°, diagonal for ±45°.
//!
//! Glyphs are a full cell wide however small the scale gets, so words that
//! are clear of each other in layout units can still collide on screen.
//! Larger words are placed first and keep their cells; a later word that
//! would land on a taken cell is left out.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::{
    cloud::{self, PlacedWord},
    model::AnalysisResult,
};

use super::theme::Theme;

/// Layout units from the centre to the edge of the drawable area.
const EXTENT: f64 = cloud::MAX_RADIUS + cloud::MAX_SIZE / 2.0;

pub struct CloudWidget<'a> {
    pub result: &'a AnalysisResult,
    /// Highlighted word, by placement order.
    pub selected: Option<usize>,
    pub block: Block<'a>,
}

/// Map a centre-relative layout position onto a cell inside `area`.
pub fn to_cell(area: Rect, x: f64, y: f64) -> (i32, i32) {
    let half_w = f64::from(area.width) / 2.0;
    let half_h = f64::from(area.height) / 2.0;
    let scale = (half_w / EXTENT).min(half_h * 2.0 / EXTENT);
    let cx = f64::from(area.x) + half_w;
    let cy = f64::from(area.y) + half_h;
    ((cx + x * scale).round() as i32, (cy + y * scale / 2.0).round() as i32)
}

/// Per-character step for a rotation, in cells.
fn direction(angle: i32) -> (i32, i32) {
    match angle {
        90 => (0, 1),
        -90 => (0, -1),
        45 => (1, 1),
        -45 => (1, -1),
        _ => (1, 0),
    }
}

fn size_style(word: &PlacedWord<'_>, selected: bool) -> Style {
    let mut style = Style::default().fg(Theme::palette(word.color_index()));
    let size = if selected { word.emphasised_size() } else { word.size };
    if size >= 40.0 {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    } else if size >= 25.0 {
        style = style.add_modifier(Modifier::BOLD);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

/// Cells a word covers, centred on its anchor like a middle-anchored label.
fn word_cells(area: Rect, word: &PlacedWord<'_>) -> Vec<(i32, i32, char)> {
    let (cx, cy) = to_cell(area, word.x, word.y);
    let (dx, dy) = direction(word.angle);
    let len = word.text.chars().count() as i32;
    let (x0, y0) = (cx - dx * len / 2, cy - dy * len / 2);
    word.text
        .chars()
        .enumerate()
        .map(|(i, ch)| (x0 + dx * i as i32, y0 + dy * i as i32, ch))
        .collect()
}

fn inside(area: Rect, x: i32, y: i32) -> bool {
    x >= i32::from(area.x)
        && x < i32::from(area.x + area.width)
        && y >= i32::from(area.y)
        && y < i32::from(area.y + area.height)
}

/// Which canvas cells already hold a glyph.
struct Occupancy {
    area: Rect,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(area: Rect) -> Self {
        Self {
            area,
            cells: vec![false; usize::from(area.width) * usize::from(area.height)],
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y - i32::from(self.area.y)) as usize * usize::from(self.area.width)
            + (x - i32::from(self.area.x)) as usize
    }

    /// `true` when every cell is on the canvas and still empty.
    fn is_free(&self, cells: &[(i32, i32, char)]) -> bool {
        cells
            .iter()
            .all(|&(x, y, _)| inside(self.area, x, y) && !self.cells[self.index(x, y)])
    }

    fn claim(&mut self, cells: &[(i32, i32, char)]) {
        for &(x, y, _) in cells {
            let i = self.index(x, y);
            self.cells[i] = true;
        }
    }
}

fn paint(buf: &mut Buffer, cells: &[(i32, i32, char)], area: Rect, style: Style) {
    for &(x, y, ch) in cells {
        if inside(area, x, y) {
            let mut tmp = [0u8; 4];
            buf.set_string(x as u16, y as u16, ch.encode_utf8(&mut tmp), style);
        }
    }
}

/// Draw `placed` in order, skipping any word whose cells are taken by an
/// earlier (larger) one.  The selected word is drawn last and always shown.
/// Returns how many words made it onto the canvas.
fn paint_cloud(buf: &mut Buffer, area: Rect, placed: &[PlacedWord<'_>], selected: Option<usize>) -> usize {
    let mut occupied = Occupancy::new(area);
    let mut drawn = 0;

    for (i, word) in placed.iter().enumerate() {
        if Some(i) == selected {
            continue;
        }
        let cells = word_cells(area, word);
        if occupied.is_free(&cells) {
            paint(buf, &cells, area, size_style(word, false));
            occupied.claim(&cells);
            drawn += 1;
        }
    }
    if let Some(word) = selected.and_then(|i| placed.get(i)) {
        paint(buf, &word_cells(area, word), area, size_style(word, true));
        drawn += 1;
    }
    drawn
}

impl Widget for CloudWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width < 10 || inner.height < 4 {
            return;
        }

        let placed = cloud::layout_result(self.result);
        if placed.is_empty() {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled("Nothing to draw.", Theme::hint_style())),
                inner.width,
            );
            return;
        }

        let canvas = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        let selected = self.selected.map(|s| s.min(placed.len() - 1));
        let drawn = paint_cloud(buf, canvas, &placed, selected);

        let readout = match selected {
            Some(i) => {
                let word = &placed[i];
                let count = self
                    .result
                    .frequencies
                    .get(word.index)
                    .map(|f| f.count)
                    .unwrap_or(0);
                Line::from(vec![
                    Span::styled(word.text, Style::default().fg(Theme::palette(word.color_index()))),
                    Span::styled(
                        format!("  count {count}  size {:.1} → {:.1}", word.size, word.emphasised_size()),
                        Theme::number_style(),
                    ),
                ])
            }
            None => {
                let shown = self.result.frequencies.len().min(cloud::MAX_CLOUD_WORDS);
                let mut text = format!("{} of {shown} words placed", placed.len());
                if drawn < placed.len() {
                    text.push_str(&format!(", {drawn} fit on screen"));
                }
                Line::from(Span::styled(text, Theme::number_style()))
            }
        };
        buf.set_line(inner.x, inner.y, &readout, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::WordCount;

    fn dump(buf: &Buffer, area: Rect) -> Vec<String> {
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    fn placed(text: &str, x: f64, y: f64, angle: i32, index: usize) -> PlacedWord<'_> {
        PlacedWord {
            text,
            size: 20.0,
            x,
            y,
            angle,
            index,
        }
    }

    #[test]
    fn centre_maps_to_middle_cell() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(to_cell(area, 0.0, 0.0), (40, 10));
        let (right, _) = to_cell(area, EXTENT, 0.0);
        assert!(right <= 80);
        let (_, bottom) = to_cell(area, 0.0, EXTENT);
        assert!(bottom <= 20);
    }

    #[test]
    fn vertical_words_run_down_the_column() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        let drawn = paint_cloud(&mut buf, area, &[placed("abc", 0.0, 0.0, 90, 0)], None);
        assert_eq!(drawn, 1);
        assert_eq!(buf[(10, 4)].symbol(), "a");
        assert_eq!(buf[(10, 5)].symbol(), "b");
        assert_eq!(buf[(10, 6)].symbol(), "c");
    }

    #[test]
    fn colliding_word_is_left_out() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        // Far enough apart in layout units, same cells on a small canvas.
        let words = [
            placed("language", 10.0, 0.0, 0, 0),
            placed("data", 40.0, 0.0, 0, 1),
        ];
        let drawn = paint_cloud(&mut buf, area, &words, None);
        assert_eq!(drawn, 1);
        let rows = dump(&buf, area);
        assert!(rows.iter().any(|r| r.contains("language")));
        assert!(!rows.iter().any(|r| r.contains("data")));
    }

    #[test]
    fn selected_word_is_always_drawn_on_top() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let words = [
            placed("language", 10.0, 0.0, 0, 0),
            placed("data", 10.0, 0.0, 0, 1),
        ];
        let drawn = paint_cloud(&mut buf, area, &words, Some(1));
        assert_eq!(drawn, 2);
        let rows = dump(&buf, area);
        assert!(rows.iter().any(|r| r.contains("data")));
    }

    #[test]
    fn renders_largest_word_intact() {
        let result = AnalysisResult {
            word_count: 12,
            unique_words: 2,
            frequencies: vec![WordCount::new("language", 9), WordCount::new("data", 3)],
        };
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        CloudWidget {
            result: &result,
            selected: None,
            block: Block::default(),
        }
        .render(area, &mut buf);
        let rows = dump(&buf, area);
        assert!(rows.iter().any(|r| r.contains("language")));
        assert!(rows[0].contains("2 of 2 words placed"));
    }
}
