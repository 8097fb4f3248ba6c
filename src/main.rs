//! Terminal client for a word-frequency analysis service.
//!
//! Run the binary to launch the interactive view.  Pass `--export csv|json`
//! to analyze a file (or stdin) once and print the export instead.

use std::fs::File;
use std::io::{self, stderr, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use word_freq::app::{
    command,
    event::{spawn_event_reader, AppEvent},
    handler,
    runtime::{self, AnalysisUpdate},
    state::{ActiveView, AppState, PaneFocus},
};
use word_freq::config::{Action, AppConfig};
use word_freq::core::{
    client::{AnalyzeRequest, FrequencyClient},
    export::ExportFormat,
    store::ViewMode,
};
use word_freq::ui::{
    bar_view::BarChartWidget,
    cloud_view::CloudWidget,
    input::InputWidget,
    layout::AppLayout,
    popup,
    spinner::BusyIndicator,
    summary::SummaryWidget,
    table_view::TableWidget,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Word-frequency analysis client")]
struct Cli {
    /// Analysis endpoint (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds; 0 waits forever.
    #[arg(long)]
    timeout: Option<u64>,

    /// Read input text from this file (`-` for stdin).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Ask the service to drop stopwords.
    #[arg(long)]
    remove_stopwords: bool,

    /// Count words case-sensitively.
    #[arg(long)]
    case_sensitive: bool,

    /// Analyze once and print the export (csv or json) without the UI.
    #[arg(long, value_name = "FORMAT")]
    export: Option<ExportFormat>,

    /// Write the headless export here instead of stdout.
    #[arg(long, requires = "export")]
    out: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ───────────────────────────────────────── setup ─────────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading text from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

// ───────────────────────────────────────── headless ──────────

async fn run_headless(
    config: &AppConfig,
    client: FrequencyClient,
    input: &Path,
    format: ExportFormat,
    out: Option<&Path>,
) -> Result<()> {
    let text = read_input(input)?;
    let request = AnalyzeRequest::new(&text, config.remove_stopwords, config.case_sensitive)?;
    let result = client
        .strict(config.strict_validation)
        .analyze(&request)
        .await?;
    tracing::info!(
        words = result.word_count,
        unique = result.unique_words,
        "headless analysis done"
    );

    let bytes = format.render(&result);
    match out {
        Some(path) => {
            std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?
        }
        None => io::stdout().write_all(&bytes)?,
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn pane_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        })
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    let main_active = state.active_view == ActiveView::Main;

    frame.render_widget(
        SummaryWidget {
            result: state.store.result(),
            view: state.store.view(),
            remove_stopwords: state.config.remove_stopwords,
            case_sensitive: state.config.case_sensitive,
            analyzed_at: state.analyzed_at,
        },
        layout.header_area,
    );

    let input_focused = main_active && state.pane_focus == PaneFocus::Input;
    frame.render_widget(
        InputWidget {
            text: &state.input,
            focused: input_focused,
            block: pane_block(" Text ".to_string(), input_focused),
        },
        layout.input_area,
    );

    let results_focused = main_active && state.pane_focus == PaneFocus::Results;
    let view = state.store.view();
    let title = match view {
        ViewMode::Bar => format!(" {} (top {}) ", view.label(), state.bar_limit),
        _ => format!(" {} ", view.label()),
    };
    let block = pane_block(title, results_focused);

    match state.store.result() {
        None => {
            let hint = format!(
                "Press {} to analyze the text, or {} to load a sample.",
                state.config.display_bindings(Action::Analyze),
                state.config.display_bindings(Action::LoadSample),
            );
            frame.render_widget(
                Paragraph::new(hint).style(Theme::hint_style()).block(block),
                layout.results_area,
            );
        }
        Some(result) => match view {
            ViewMode::Table => {
                let widget = TableWidget::new(result, &state.table_filter)
                    .focused(results_focused)
                    .block(block);
                frame.render_stateful_widget(widget, layout.results_area, &mut state.table_state);
            }
            ViewMode::Bar => frame.render_widget(
                BarChartWidget {
                    frequencies: &result.frequencies,
                    limit: state.bar_limit,
                    selected: state.bar_selected,
                    block,
                },
                layout.results_area,
            ),
            ViewMode::Cloud => frame.render_widget(
                CloudWidget {
                    result,
                    selected: results_focused.then_some(state.cloud_selected),
                    block,
                },
                layout.results_area,
            ),
        },
    }

    frame.render_widget(
        BusyIndicator {
            visible: state.is_busy(),
            tick: state.tick,
        },
        layout.results_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Main => state.status_message.as_deref().unwrap_or(&hint),
        _ => "",
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state: &*state }, frame.area());
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                frame.area(),
            );
        }
        ActiveView::Notification => {
            let message = state.notification.as_deref().unwrap_or_default();
            frame.render_widget(popup::NotificationPopup { message }, frame.area());
        }
        ActiveView::Main => {}
    }
}

// ───────────────────────────────────────── event loop ────────

type Tui = Terminal<CrosstermBackend<io::Stderr>>;

async fn run_tui(terminal: &mut Tui, state: &mut AppState, client: &FrequencyClient) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (analysis_tx, mut analysis_rx) = mpsc::unbounded_channel::<AnalysisUpdate>();

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let effect = match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Paste(text) => {
                        handler::handle_paste(state, &text);
                        None
                    }
                    AppEvent::Resize(_, _) => None,
                    AppEvent::Tick => {
                        state.tick = state.tick.wrapping_add(1);
                        None
                    }
                };
                if let Some(effect) = effect {
                    runtime::execute(state, effect, client, &analysis_tx);
                }
            }

            Some(update) = analysis_rx.recv() => {
                command::apply_analysis(state, update.generation, update.result);
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = AppConfig::load();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }
    config.remove_stopwords |= cli.remove_stopwords;
    config.case_sensitive |= cli.case_sensitive;

    let client = FrequencyClient::new(config.endpoint.clone(), config.request_timeout())
        .context("building HTTP client")?;
    tracing::debug!(endpoint = client.endpoint(), "client ready");

    // ── headless mode ─────────────────────────────────────────
    if let Some(format) = cli.export {
        let input = cli.file.unwrap_or_else(|| PathBuf::from("-"));
        return run_headless(&config, client, &input, format, cli.out.as_deref()).await;
    }

    let mut state = AppState::new(config);
    if let Some(ref path) = cli.file {
        state.input = read_input(path)?;
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let outcome = run_tui(&mut terminal, &mut state, &client).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    outcome
}
