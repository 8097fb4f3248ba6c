//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use crate::config::AppConfig;
use crate::core::store::ResultStore;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Main,
    SettingsMenu,
    ControlsSubmenu,
    /// A blocking message the user must dismiss.
    Notification,
}

/// Which pane receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneFocus {
    #[default]
    Input,
    Results,
}

/// Selection + scroll for a list-like results view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    /// Index into the *visible* items that is currently highlighted.
    pub selected: usize,
    /// First visible item.
    pub offset: usize,
}

impl ListState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep `selected` inside `[0, len)`.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Top-level application state.
pub struct AppState {
    /// Text typed or pasted by the user.
    pub input: String,
    /// The most recent analysis and the active visualisation.
    pub store: ResultStore,
    /// Case-insensitive substring filter for the table view.
    pub table_filter: String,
    /// Table row selection (indexes visible rows).
    pub table_state: ListState,
    /// Highlighted bar (the terminal stand-in for hovering).
    pub bar_selected: usize,
    /// Highlighted word in the cloud, by placement order.
    pub cloud_selected: usize,
    /// Bars shown in the chart view.
    pub bar_limit: usize,
    /// Generation of the most recently issued analysis request.
    pub request_generation: u64,
    /// `Some(generation)` while that request is outstanding.
    pub pending_request: Option<u64>,
    /// Local time of the last successful analysis.
    pub analyzed_at: Option<chrono::DateTime<chrono::Local>>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Message shown by the notification overlay.
    pub notification: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    pub pane_focus: PaneFocus,
    /// User configuration: options, bindings, export location.
    pub config: AppConfig,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Incremented on every tick; drives the busy spinner.
    pub tick: u64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            input: String::new(),
            store: ResultStore::new(),
            table_filter: String::new(),
            table_state: ListState::default(),
            bar_selected: 0,
            cloud_selected: 0,
            bar_limit: config.bar_limit,
            request_generation: 0,
            pending_request: None,
            analyzed_at: None,
            should_quit: false,
            status_message: None,
            notification: None,
            active_view: ActiveView::default(),
            pane_focus: PaneFocus::default(),
            config,
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            tick: 0,
        }
    }

    /// `true` while an analysis request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Show a blocking message over the main view.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.active_view = ActiveView::Notification;
    }

    /// Reset per-result view state (filter, selections).
    pub fn reset_view_state(&mut self) {
        self.table_filter.clear();
        self.table_state.reset();
        self.bar_selected = 0;
        self.cloud_selected = 0;
    }
}
