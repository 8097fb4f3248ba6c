//! Command dispatcher: user intents as pure state transitions.
//!
//! Every discrete user intent becomes a [`Command`].  [`dispatch`] applies it
//! to [`AppState`] and, when the intent needs the outside world (network,
//! file system), returns an [`Effect`] for `app::runtime` to carry out.
//! Results of those effects come back through [`apply_analysis`] and
//! [`apply_saved`].

use std::path::PathBuf;

use crate::core::{
    bar,
    client::{AnalyzeError, AnalyzeRequest},
    export::ExportFormat,
    model::AnalysisResult,
    sample::SAMPLE_TEXT,
    store::ViewMode,
    table::group_thousands,
};

use super::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze,
    Clear,
    LoadSample,
    FilterTable(String),
    SetBarLimit(usize),
    CycleBarLimit,
    Export(ExportFormat),
    SwitchView(ViewMode),
    ToggleRemoveStopwords,
    ToggleCaseSensitive,
}

/// Side effects requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `request` to the analysis service, tagged with `generation`.
    Analyze {
        generation: u64,
        request: AnalyzeRequest,
        strict: bool,
    },
    /// Hand an export to the file-save collaborator.
    Save {
        format: ExportFormat,
        bytes: Vec<u8>,
    },
}

pub fn dispatch(state: &mut AppState, command: Command) -> Option<Effect> {
    match command {
        Command::Analyze => {
            let request = match AnalyzeRequest::new(
                &state.input,
                state.config.remove_stopwords,
                state.config.case_sensitive,
            ) {
                Ok(request) => request,
                Err(e) => {
                    state.status_message = Some(e.to_string());
                    return None;
                }
            };
            state.request_generation += 1;
            let generation = state.request_generation;
            if let Some(previous) = state.pending_request.replace(generation) {
                tracing::debug!(previous, generation, "superseding outstanding analysis");
            }
            state.status_message = Some("Analyzing…".to_string());
            Some(Effect::Analyze {
                generation,
                request,
                strict: state.config.strict_validation,
            })
        }
        Command::Clear => {
            state.input.clear();
            state.store.clear();
            state.reset_view_state();
            state.analyzed_at = None;
            // Anything still in flight must not repopulate the store.
            if state.pending_request.take().is_some() {
                state.request_generation += 1;
            }
            state.status_message = None;
            None
        }
        Command::LoadSample => {
            state.input = SAMPLE_TEXT.to_string();
            state.status_message = Some("Sample text loaded".to_string());
            None
        }
        Command::FilterTable(term) => {
            state.table_filter = term;
            state.table_state.reset();
            None
        }
        Command::SetBarLimit(limit) => {
            if bar::is_valid_limit(limit) {
                set_bar_limit(state, limit);
            }
            None
        }
        Command::CycleBarLimit => {
            set_bar_limit(state, bar::next_limit(state.bar_limit));
            None
        }
        Command::Export(format) => {
            let Some(result) = state.store.result() else {
                state.status_message = Some("Nothing to export yet; analyze some text first".to_string());
                return None;
            };
            Some(Effect::Save {
                format,
                bytes: format.render(result),
            })
        }
        Command::SwitchView(view) => {
            state.store.set_view(view);
            None
        }
        Command::ToggleRemoveStopwords => {
            state.config.remove_stopwords = !state.config.remove_stopwords;
            save_config(state);
            state.status_message = Some(format!(
                "Remove stopwords: {}",
                on_off(state.config.remove_stopwords)
            ));
            None
        }
        Command::ToggleCaseSensitive => {
            state.config.case_sensitive = !state.config.case_sensitive;
            save_config(state);
            state.status_message = Some(format!(
                "Case sensitive: {}",
                on_off(state.config.case_sensitive)
            ));
            None
        }
    }
}

/// Apply the outcome of the request tagged `generation`.  Returns `false`
/// when the response belongs to a superseded request and was ignored.
pub fn apply_analysis(
    state: &mut AppState,
    generation: u64,
    outcome: Result<AnalysisResult, AnalyzeError>,
) -> bool {
    if generation != state.request_generation || state.pending_request != Some(generation) {
        tracing::debug!(
            generation,
            latest = state.request_generation,
            "dropping stale analysis response"
        );
        return false;
    }
    state.pending_request = None;

    match outcome {
        Ok(result) => {
            state.status_message = Some(format!(
                "Analyzed {} words ({} unique)",
                group_thousands(result.word_count),
                group_thousands(result.unique_words)
            ));
            state.store.set(result);
            state.reset_view_state();
            state.analyzed_at = Some(chrono::Local::now());
        }
        Err(e) => {
            tracing::warn!(generation, "analysis failed: {e}");
            state.status_message = None;
            let headline = if e.is_network_or_server() {
                "An error occurred while analyzing the text. Please try again."
            } else {
                "The analysis service sent a response that could not be used."
            };
            state.notify(format!("{headline}\n\n{e}"));
        }
    }
    true
}

/// Report the outcome of a file save.
pub fn apply_saved(state: &mut AppState, format: ExportFormat, outcome: anyhow::Result<PathBuf>) {
    match outcome {
        Ok(path) => {
            state.status_message = Some(format!("Exported {} to {}", format.label(), path.display()));
        }
        Err(e) => {
            tracing::warn!("export failed: {e:#}");
            state.notify(format!("Could not save {}: {e:#}", format.file_name()));
        }
    }
}

fn set_bar_limit(state: &mut AppState, limit: usize) {
    state.bar_limit = limit;
    state.bar_selected = state.bar_selected.min(limit.saturating_sub(1));
    state.config.bar_limit = limit;
    save_config(state);
    state.status_message = Some(format!("Bar chart: top {limit}"));
}

fn save_config(state: &AppState) {
    if let Err(e) = state.config.save() {
        tracing::error!("failed to save config to {}: {e:#}", state.config.path().display());
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ActiveView;
    use crate::config::AppConfig;
    use crate::core::model::WordCount;

    fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().join("config.toml"));
        (AppState::new(config), dir)
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            word_count: 3,
            unique_words: 2,
            frequencies: vec![WordCount::new("the", 2), WordCount::new("cat", 1)],
        }
    }

    fn start_analysis(state: &mut AppState) -> u64 {
        match dispatch(state, Command::Analyze) {
            Some(Effect::Analyze { generation, .. }) => generation,
            other => panic!("expected analyze effect, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_never_requests() {
        let (mut state, _dir) = state();
        state.input = "   \n ".into();
        assert_eq!(dispatch(&mut state, Command::Analyze), None);
        assert!(!state.is_busy());
        assert!(!state.store.has_result());
        assert_eq!(state.status_message.as_deref(), Some("Please enter some text to analyze"));
    }

    #[test]
    fn analyze_carries_options_and_trimmed_text() {
        let (mut state, _dir) = state();
        state.input = "  the cat  ".into();
        state.config.remove_stopwords = true;
        let effect = dispatch(&mut state, Command::Analyze).unwrap();
        assert_eq!(
            effect,
            Effect::Analyze {
                generation: 1,
                request: AnalyzeRequest {
                    text: "the cat".into(),
                    remove_stopwords: true,
                    case_sensitive: false,
                },
                strict: true,
            }
        );
        assert!(state.is_busy());
    }

    #[test]
    fn success_stores_result_and_clears_filter() {
        let (mut state, _dir) = state();
        state.input = "the cat the".into();
        let generation = start_analysis(&mut state);
        state.table_filter = "ca".into();

        assert!(apply_analysis(&mut state, generation, Ok(result())));
        assert!(!state.is_busy());
        assert_eq!(state.store.result(), Some(&result()));
        assert!(state.table_filter.is_empty());
        assert!(state.analyzed_at.is_some());
    }

    #[test]
    fn only_latest_request_lands() {
        let (mut state, _dir) = state();
        state.input = "words".into();
        let first = start_analysis(&mut state);
        let second = start_analysis(&mut state);

        assert!(!apply_analysis(&mut state, first, Ok(result())));
        assert!(!state.store.has_result());
        assert!(state.is_busy());

        assert!(apply_analysis(&mut state, second, Err(AnalyzeError::Status(500))));
        assert!(!state.is_busy());
        assert_eq!(state.active_view, ActiveView::Notification);
        let message = state.notification.as_deref().unwrap();
        assert!(message.starts_with("An error occurred while analyzing the text."));
        assert!(message.contains("HTTP 500"));
    }

    #[test]
    fn failure_leaves_previous_result() {
        let (mut state, _dir) = state();
        state.store.set(result());
        state.input = "again".into();
        let generation = start_analysis(&mut state);
        apply_analysis(
            &mut state,
            generation,
            Err(AnalyzeError::MalformedResponse("missing field".into())),
        );
        assert_eq!(state.store.result(), Some(&result()));
        let message = state.notification.as_deref().unwrap();
        assert!(message.starts_with("The analysis service sent a response"));
        assert!(message.contains("missing field"));
    }

    #[test]
    fn clear_resets_everything_and_orphans_inflight_request() {
        let (mut state, _dir) = state();
        state.store.set(result());
        state.store.set_view(ViewMode::Cloud);
        state.input = "text".into();
        let generation = start_analysis(&mut state);

        dispatch(&mut state, Command::Clear);
        assert!(state.input.is_empty());
        assert!(!state.store.has_result());
        assert_eq!(state.store.view(), ViewMode::Table);
        assert!(!state.is_busy());

        assert!(!apply_analysis(&mut state, generation, Ok(result())));
        assert!(!state.store.has_result());
    }

    #[test]
    fn export_requires_a_result() {
        let (mut state, _dir) = state();
        assert_eq!(dispatch(&mut state, Command::Export(ExportFormat::Csv)), None);

        state.store.set(result());
        match dispatch(&mut state, Command::Export(ExportFormat::Csv)) {
            Some(Effect::Save { format, bytes }) => {
                assert_eq!(format, ExportFormat::Csv);
                assert!(String::from_utf8(bytes).unwrap().starts_with("Rank,Word,Count,Percentage\n"));
            }
            other => panic!("expected save effect, got {other:?}"),
        }
    }

    #[test]
    fn bar_limit_accepts_only_offered_values() {
        let (mut state, _dir) = state();
        dispatch(&mut state, Command::SetBarLimit(20));
        assert_eq!(state.bar_limit, 20);
        dispatch(&mut state, Command::SetBarLimit(7));
        assert_eq!(state.bar_limit, 20);
        dispatch(&mut state, Command::CycleBarLimit);
        assert_eq!(state.bar_limit, 50);
        assert_eq!(state.config.bar_limit, 50);
    }

    #[test]
    fn switching_view_keeps_result() {
        let (mut state, _dir) = state();
        state.store.set(result());
        dispatch(&mut state, Command::SwitchView(ViewMode::Bar));
        assert_eq!(state.store.view(), ViewMode::Bar);
        assert!(state.store.has_result());
    }

    #[test]
    fn sample_and_toggles() {
        let (mut state, _dir) = state();
        dispatch(&mut state, Command::LoadSample);
        assert!(state.input.starts_with("Natural Language Processing"));

        dispatch(&mut state, Command::ToggleCaseSensitive);
        assert!(state.config.case_sensitive);
        dispatch(&mut state, Command::ToggleRemoveStopwords);
        assert!(state.config.remove_stopwords);
        assert!(state.config.path().exists());
    }
}
