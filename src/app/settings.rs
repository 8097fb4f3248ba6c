//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::command::{dispatch, Command};
use super::state::{ActiveView, AppState};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle: reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value shown next to the label, if the item has one.
    pub fn value(&self, state: &AppState) -> Option<String> {
        match self {
            Self::Submenu { .. } => None,
            Self::Toggle { get, .. } => Some(if get(state) { "[ON]" } else { "[OFF]" }.to_string()),
            Self::Cycle { value, .. } => Some(value(state)),
        }
    }

    /// Run the item's action (open, flip, or advance).
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Submenu { view, .. } => {
                state.active_view = *view;
                state.controls_selected = 0;
            }
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Remove Stopwords",
        get: |s| s.config.remove_stopwords,
        set: |s, v| {
            if s.config.remove_stopwords != v {
                dispatch(s, Command::ToggleRemoveStopwords);
            }
        },
    },
    SettingsItem::Toggle {
        label: "Case Sensitive",
        get: |s| s.config.case_sensitive,
        set: |s, v| {
            if s.config.case_sensitive != v {
                dispatch(s, Command::ToggleCaseSensitive);
            }
        },
    },
    SettingsItem::Toggle {
        label: "Strict Validation",
        get: |s| s.config.strict_validation,
        set: |s, v| {
            s.config.strict_validation = v;
            if let Err(e) = s.config.save() {
                tracing::error!("failed to save config: {e:#}");
            }
            s.status_message = Some(if v {
                "Totals must match the returned entries".to_string()
            } else {
                "Accepting top-N subsets from the service".to_string()
            });
        },
    },
    SettingsItem::Cycle {
        label: "Bar Limit",
        value: |s| format!("top {}", s.bar_limit),
        cycle: |s| {
            dispatch(s, Command::CycleBarLimit);
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn toggles_flip_config_and_report_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(AppConfig::load_from(dir.path().join("config.toml")));

        let stopwords = &SETTINGS_ITEMS[1];
        assert_eq!(stopwords.value(&state).as_deref(), Some("[OFF]"));
        stopwords.activate(&mut state);
        assert!(state.config.remove_stopwords);
        assert_eq!(stopwords.value(&state).as_deref(), Some("[ON]"));

        let strict = &SETTINGS_ITEMS[3];
        strict.activate(&mut state);
        assert!(!state.config.strict_validation);

        let limit = &SETTINGS_ITEMS[4];
        assert_eq!(limit.value(&state).as_deref(), Some("top 10"));
        limit.activate(&mut state);
        assert_eq!(limit.value(&state).as_deref(), Some("top 20"));

        SETTINGS_ITEMS[0].activate(&mut state);
        assert_eq!(state.active_view, ActiveView::ControlsSubmenu);
    }
}
