//! Analysis result types as they travel over the wire.

use serde::{Deserialize, Serialize};

/// One frequency entry: a word and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Statistics returned by the analysis service for one block of text.
///
/// `frequencies` is ordered by `count` descending.  Once stored the value is
/// never mutated; the next successful analysis replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub word_count: u64,
    pub unique_words: u64,
    pub frequencies: Vec<WordCount>,
}

impl AnalysisResult {
    /// Check the producer contract.
    ///
    /// Every count must be at least one and the sequence must be sorted
    /// descending.  In strict mode the totals must match exactly; otherwise
    /// the entries may be a top-N subset of the full statistics.
    pub fn validate(&self, strict: bool) -> Result<(), String> {
        if let Some(entry) = self.frequencies.iter().find(|f| f.count == 0) {
            return Err(format!("word {:?} has a zero count", entry.word));
        }
        if let Some(pair) = self
            .frequencies
            .windows(2)
            .find(|pair| pair[0].count < pair[1].count)
        {
            return Err(format!(
                "frequencies not sorted: {:?} ({}) before {:?} ({})",
                pair[0].word, pair[0].count, pair[1].word, pair[1].count
            ));
        }

        let sum = self
            .frequencies
            .iter()
            .try_fold(0u64, |acc, f| acc.checked_add(f.count))
            .ok_or_else(|| "counts overflow".to_string())?;
        let listed = self.frequencies.len() as u64;

        if strict {
            if sum != self.word_count {
                return Err(format!(
                    "wordCount is {} but counts sum to {sum}",
                    self.word_count
                ));
            }
            if listed != self.unique_words {
                return Err(format!(
                    "uniqueWords is {} but {listed} entries were returned",
                    self.unique_words
                ));
            }
        } else {
            if sum > self.word_count {
                return Err(format!(
                    "counts sum to {sum}, more than wordCount {}",
                    self.word_count
                ));
            }
            if listed > self.unique_words {
                return Err(format!(
                    "{listed} entries returned, more than uniqueWords {}",
                    self.unique_words
                ));
            }
        }
        Ok(())
    }

    /// Count of the most frequent word (the first entry), if any.
    pub fn max_count(&self) -> Option<u64> {
        self.frequencies.first().map(|f| f.count)
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
