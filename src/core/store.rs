//! Result store: the single most recent analysis and the active view.

use super::model::AnalysisResult;

/// Which visualisation of the stored result is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Bar,
    Cloud,
}

impl ViewMode {
    pub const ALL: &[ViewMode] = &[ViewMode::Table, ViewMode::Bar, ViewMode::Cloud];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Bar => "Bar Chart",
            ViewMode::Cloud => "Word Cloud",
        }
    }
}

/// Holds at most one [`AnalysisResult`].  Switching views never touches it.
#[derive(Debug, Default)]
pub struct ResultStore {
    result: Option<AnalysisResult>,
    view: ViewMode,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored result wholesale.
    pub fn set(&mut self, result: AnalysisResult) {
        self.result = Some(result);
    }

    /// Drop the result and return to the default view.
    pub fn clear(&mut self) {
        self.result = None;
        self.view = ViewMode::default();
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::WordCount;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            word_count: 3,
            unique_words: 2,
            frequencies: vec![WordCount::new("a", 2), WordCount::new("b", 1)],
        }
    }

    #[test]
    fn switching_view_keeps_result() {
        let mut store = ResultStore::new();
        store.set(sample());
        store.set_view(ViewMode::Cloud);
        assert_eq!(store.view(), ViewMode::Cloud);
        assert_eq!(store.result(), Some(&sample()));
    }

    #[test]
    fn set_replaces_previous_result() {
        let mut store = ResultStore::new();
        store.set(sample());
        let newer = AnalysisResult {
            word_count: 1,
            unique_words: 1,
            frequencies: vec![WordCount::new("z", 1)],
        };
        store.set(newer.clone());
        assert_eq!(store.result(), Some(&newer));
    }

    #[test]
    fn clear_resets_from_any_state() {
        let mut store = ResultStore::new();
        store.clear();
        assert!(!store.has_result());
        assert_eq!(store.view(), ViewMode::Table);

        store.set(sample());
        store.set_view(ViewMode::Bar);
        store.clear();
        assert!(!store.has_result());
        assert_eq!(store.view(), ViewMode::Table);
    }
}
