//! Input handling: maps key and paste events to commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::{Action, KeyBind};
use crate::core::{cloud, export::ExportFormat, store::ViewMode, table};

use super::command::{dispatch, Command, Effect};
use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState, PaneFocus};

/// Rows moved by PageUp/PageDown in the table.
const PAGE_ROWS: usize = 10;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return None;
    }

    match state.active_view {
        ActiveView::Main => handle_main_key(state, key),
        ActiveView::SettingsMenu => {
            handle_settings_key(state, key);
            None
        }
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
            None
        }
        ActiveView::Notification => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                state.notification = None;
                state.active_view = ActiveView::Main;
            }
            None
        }
    }
}

/// Pasted text goes wherever typing would.
pub fn handle_paste(state: &mut AppState, text: &str) {
    if state.active_view != ActiveView::Main {
        return;
    }
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    match state.pane_focus {
        PaneFocus::Input => state.input.push_str(&text),
        PaneFocus::Results if state.store.view() == ViewMode::Table => {
            let line = text.lines().next().unwrap_or_default();
            let term = format!("{}{line}", state.table_filter);
            dispatch(state, Command::FilterTable(term));
        }
        PaneFocus::Results => {}
    }
}

// ── Main view ───────────────────────────────────────────────────

fn handle_main_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    if key.code == KeyCode::Tab {
        state.pane_focus = match state.pane_focus {
            PaneFocus::Input => PaneFocus::Results,
            PaneFocus::Results => PaneFocus::Input,
        };
        return None;
    }

    if let Some(action) = state.config.match_key(key) {
        return handle_action(state, action);
    }

    match state.pane_focus {
        PaneFocus::Input => {
            handle_input_key(state, key);
            None
        }
        PaneFocus::Results => {
            handle_results_key(state, key);
            None
        }
    }
}

fn handle_action(state: &mut AppState, action: Action) -> Option<Effect> {
    let command = match action {
        Action::Quit => {
            state.should_quit = true;
            return None;
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
            return None;
        }
        Action::Analyze => Command::Analyze,
        Action::Clear => Command::Clear,
        Action::LoadSample => Command::LoadSample,
        Action::ViewTable => Command::SwitchView(ViewMode::Table),
        Action::ViewBar => Command::SwitchView(ViewMode::Bar),
        Action::ViewCloud => Command::SwitchView(ViewMode::Cloud),
        Action::CycleBarLimit => Command::CycleBarLimit,
        Action::ExportCsv => Command::Export(ExportFormat::Csv),
        Action::ExportJson => Command::Export(ExportFormat::Json),
        Action::ToggleStopwords => Command::ToggleRemoveStopwords,
        Action::ToggleCaseSensitive => Command::ToggleCaseSensitive,
    };
    dispatch(state, command)
}

fn is_plain_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => Some(ch),
        _ => None,
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) {
    if let Some(ch) = is_plain_char(key) {
        state.input.push(ch);
        return;
    }
    match key.code {
        KeyCode::Enter => state.input.push('\n'),
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Esc => state.pane_focus = PaneFocus::Results,
        _ => {}
    }
}

fn handle_results_key(state: &mut AppState, key: KeyEvent) {
    match state.store.view() {
        ViewMode::Table => handle_table_key(state, key),
        ViewMode::Bar => {
            let shown = state
                .store
                .result()
                .map(|r| r.frequencies.len().min(state.bar_limit))
                .unwrap_or(0);
            step_selection(&mut state.bar_selected, shown, key.code);
        }
        ViewMode::Cloud => {
            let placed = state
                .store
                .result()
                .map(|r| cloud::layout_result(r).len())
                .unwrap_or(0);
            step_selection(&mut state.cloud_selected, placed, key.code);
        }
    }
}

/// Left/Right (or h/l) walk a highlighted item through `len` items.
fn step_selection(selected: &mut usize, len: usize, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => *selected = selected.saturating_sub(1),
        KeyCode::Right | KeyCode::Char('l') => {
            if *selected + 1 < len {
                *selected += 1;
            }
        }
        KeyCode::Home => *selected = 0,
        KeyCode::End => *selected = len.saturating_sub(1),
        _ => {}
    }
}

fn handle_table_key(state: &mut AppState, key: KeyEvent) {
    let visible = state
        .store
        .result()
        .map(|r| table::visible_rows(r, &state.table_filter).len())
        .unwrap_or(0);

    match key.code {
        KeyCode::Up => state.table_state.select_prev(),
        KeyCode::Down => state.table_state.select_next(visible),
        KeyCode::PageUp => {
            state.table_state.selected = state.table_state.selected.saturating_sub(PAGE_ROWS);
        }
        KeyCode::PageDown => {
            state.table_state.selected = (state.table_state.selected + PAGE_ROWS).min(visible.saturating_sub(1));
        }
        KeyCode::Home => state.table_state.selected = 0,
        KeyCode::End => state.table_state.selected = visible.saturating_sub(1),
        KeyCode::Backspace => {
            let mut term = state.table_filter.clone();
            term.pop();
            dispatch(state, Command::FilterTable(term));
        }
        KeyCode::Esc if !state.table_filter.is_empty() => {
            dispatch(state, Command::FilterTable(String::new()));
        }
        _ => {
            if let Some(ch) = is_plain_char(key) {
                let term = format!("{}{ch}", state.table_filter);
                dispatch(state, Command::FilterTable(term));
            }
        }
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(2) => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                save_bindings(state);
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            // Clear all bindings for the selected action.
            if state.controls_selected < Action::ALL.len() {
                let action = Action::ALL[state.controls_selected];
                state.config.bindings.insert(action, Vec::new());
                save_bindings(state);
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Tab is reserved for pane focus.
    if key.code == KeyCode::Tab {
        return;
    }

    let action = Action::ALL[state.controls_selected];
    state.config.add_binding(action, KeyBind::from_key_event(key));
    save_bindings(state);
    state.awaiting_rebind = false;
}

fn save_bindings(state: &mut AppState) {
    if let Err(e) = state.config.save() {
        tracing::error!("failed to save bindings: {e:#}");
        state.status_message = Some("Could not save key bindings".to_string());
    }
}
