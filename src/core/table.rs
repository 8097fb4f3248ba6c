//! Table rows: ranks, percentages, and the substring filter.

use super::model::{AnalysisResult, WordCount};

/// One table row.  `rank` is 1-based and never changes under filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    pub rank: usize,
    pub word: &'a str,
    pub count: u64,
    pub percentage: f64,
    pub visible: bool,
}

impl TableRow<'_> {
    /// Percentage with two decimals, e.g. `"12.00"`.
    pub fn percentage_text(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// `count / word_count * 100`; zero when the total is zero.
pub fn percentage(count: u64, word_count: u64) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    count as f64 / word_count as f64 * 100.0
}

/// Two decimals, with exact ties rounded up (`0.125` → `"0.13"`) where
/// `{:.2}` alone would round them to even.
pub fn format_percentage(value: f64) -> String {
    // Only odd multiples of 1/8 sit exactly halfway at the third decimal.
    let eighths = value * 8.0;
    let exact_tie = value >= 0.0
        && eighths < 9_007_199_254_740_992.0
        && eighths.fract() == 0.0
        && (eighths as u64) % 2 == 1;
    if exact_tie {
        return format!("{:.2}", (value * 100.0).ceil() / 100.0);
    }
    format!("{value:.2}")
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Case-insensitive substring match on the word text.  An empty term
/// matches everything.
pub fn matches_filter(entry: &WordCount, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    entry.word.to_lowercase().contains(&term.to_lowercase())
}

/// Build every row in stored order, flagging the ones the filter hides.
pub fn rows<'a>(result: &'a AnalysisResult, filter: &str) -> Vec<TableRow<'a>> {
    let term = filter.to_lowercase();
    result
        .frequencies
        .iter()
        .enumerate()
        .map(|(i, entry)| TableRow {
            rank: i + 1,
            word: &entry.word,
            count: entry.count,
            percentage: percentage(entry.count, result.word_count),
            visible: matches_filter(entry, &term),
        })
        .collect()
}

/// Only the rows the filter lets through, still in rank order.
pub fn visible_rows<'a>(result: &'a AnalysisResult, filter: &str) -> Vec<TableRow<'a>> {
    rows(result, filter).into_iter().filter(|r| r.visible).collect()
}
