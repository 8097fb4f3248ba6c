//! Side-effecting handlers: the analysis request and the file save.
//!
//! Requests run as background tasks so the UI thread never waits on the
//! network; their outcomes come back over a channel tagged with the
//! generation that issued them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::sync::mpsc;

use crate::core::{
    client::{AnalyzeError, AnalyzeRequest, FrequencyClient},
    export::ExportFormat,
    model::AnalysisResult,
};

use super::command::{self, Effect};
use super::state::AppState;

/// Outcome of one analysis request.
#[derive(Debug)]
pub struct AnalysisUpdate {
    pub generation: u64,
    pub result: Result<AnalysisResult, AnalyzeError>,
}

/// Carry out `effect`.  Network work is spawned; file saves finish inline.
pub fn execute(
    state: &mut AppState,
    effect: Effect,
    client: &FrequencyClient,
    tx: &mpsc::UnboundedSender<AnalysisUpdate>,
) {
    match effect {
        Effect::Analyze {
            generation,
            request,
            strict,
        } => {
            spawn_analysis(tx.clone(), client.clone().strict(strict), generation, request);
        }
        Effect::Save { format, bytes } => {
            let outcome = save_export(&state.config.export_dir, format, &bytes);
            command::apply_saved(state, format, outcome);
        }
    }
}

pub fn spawn_analysis(
    tx: mpsc::UnboundedSender<AnalysisUpdate>,
    client: FrequencyClient,
    generation: u64,
    request: AnalyzeRequest,
) {
    tokio::spawn(async move {
        let t0 = std::time::Instant::now();
        let result = client.analyze(&request).await;
        tracing::debug!(generation, ok = result.is_ok(), "analysis finished in {:.2?}", t0.elapsed());
        let _ = tx.send(AnalysisUpdate { generation, result });
    });
}

/// Write `bytes` to `<dir>/<format file name>`, creating `dir` if needed.
pub fn save_export(dir: &Path, format: ExportFormat, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;
    let path = dir.join(format.file_name());
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        mime = format.mime_type(),
        "saved export"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::model::WordCount;

    #[test]
    fn save_writes_named_file_into_new_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let path = save_export(&target, ExportFormat::Json, b"{}").unwrap();
        assert_eq!(path, target.join("word-frequency.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn save_effect_reports_path_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::load_from(dir.path().join("config.toml"));
        config.export_dir = dir.path().join("exports");
        let mut state = AppState::new(config);
        state.store.set(AnalysisResult {
            word_count: 1,
            unique_words: 1,
            frequencies: vec![WordCount::new("hi", 1)],
        });

        let client = FrequencyClient::new("http://127.0.0.1:9/analyze", None).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let effect = command::dispatch(&mut state, command::Command::Export(ExportFormat::Csv)).unwrap();
        execute(&mut state, effect, &client, &tx);

        let written = dir.path().join("exports").join("word-frequency.csv");
        assert_eq!(
            std::fs::read_to_string(&written).unwrap(),
            "Rank,Word,Count,Percentage\n1,\"hi\",1,100.00\n"
        );
        assert!(state.status_message.unwrap().contains("word-frequency.csv"));
    }
}
