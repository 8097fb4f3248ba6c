//! CSV / JSON export of the stored result.
//!
//! The exporter only produces bytes; writing them somewhere is the caller's
//! business.

use super::model::AnalysisResult;
use super::table::{format_percentage, percentage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "word-frequency.csv",
            ExportFormat::Json => "word-frequency.json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn render(self, result: &AnalysisResult) -> Vec<u8> {
        match self {
            ExportFormat::Csv => to_csv(result).into_bytes(),
            ExportFormat::Json => to_json(result).into_bytes(),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format {other:?} (expected csv or json)")),
        }
    }
}

/// `Rank,Word,Count,Percentage` followed by one row per entry.  Words are
/// always quoted.
pub fn to_csv(result: &AnalysisResult) -> String {
    let mut out = String::from("Rank,Word,Count,Percentage\n");
    for (i, entry) in result.frequencies.iter().enumerate() {
        let pct = format_percentage(percentage(entry.count, result.word_count));
        out.push_str(&format!(
            "{},\"{}\",{},{}\n",
            i + 1,
            entry.word.replace('"', "\"\""),
            entry.count,
            pct
        ));
    }
    out
}

/// The whole result, pretty-printed with two-space indentation.
pub fn to_json(result: &AnalysisResult) -> String {
    // Plain data with string keys; serialisation cannot fail.
    serde_json::to_string_pretty(result).unwrap_or_default()
}
