//! User configuration: service options, keybindings, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/word-freq/config.toml` (default `~/.config/word-freq/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::bar::{is_valid_limit, DEFAULT_BAR_LIMIT};
use crate::core::client::DEFAULT_ENDPOINT;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Analyze,
    Clear,
    LoadSample,
    ViewTable,
    ViewBar,
    ViewCloud,
    CycleBarLimit,
    ExportCsv,
    ExportJson,
    ToggleStopwords,
    ToggleCaseSensitive,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::Analyze,
        Action::Clear,
        Action::LoadSample,
        Action::ViewTable,
        Action::ViewBar,
        Action::ViewCloud,
        Action::CycleBarLimit,
        Action::ExportCsv,
        Action::ExportJson,
        Action::ToggleStopwords,
        Action::ToggleCaseSensitive,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Analyze => "Analyze",
            Action::Clear => "Clear",
            Action::LoadSample => "Load Sample",
            Action::ViewTable => "Table View",
            Action::ViewBar => "Bar Chart View",
            Action::ViewCloud => "Word Cloud View",
            Action::CycleBarLimit => "Cycle Bar Limit",
            Action::ExportCsv => "Export CSV",
            Action::ExportJson => "Export JSON",
            Action::ToggleStopwords => "Toggle Stopwords",
            Action::ToggleCaseSensitive => "Toggle Case",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Analyze => "analyze",
            Action::Clear => "clear",
            Action::LoadSample => "load_sample",
            Action::ViewTable => "view_table",
            Action::ViewBar => "view_bar",
            Action::ViewCloud => "view_cloud",
            Action::CycleBarLimit => "cycle_bar_limit",
            Action::ExportCsv => "export_csv",
            Action::ExportJson => "export_json",
            Action::ToggleStopwords => "toggle_stopwords",
            Action::ToggleCaseSensitive => "toggle_case_sensitive",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & MODIFIER_MASK,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Alt+2"`, `"Ctrl+r"`, `"F5"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.code_config_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+r"`, `"F5"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.code_config_name())
    }

    fn code_config_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+r"`, `"Alt+1"`, `"F5"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: analysis options, display and export
/// settings, keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Analysis endpoint URL.
    pub endpoint: String,
    /// Seconds before an outstanding request is abandoned; 0 waits forever.
    pub request_timeout_secs: u64,
    pub remove_stopwords: bool,
    pub case_sensitive: bool,
    /// Require totals that match the returned entries exactly.
    pub strict_validation: bool,
    /// Bars shown in the chart view (10, 20 or 50).
    pub bar_limit: usize,
    /// Where exported files are written.
    pub export_dir: PathBuf,
    /// File this config was loaded from and is saved back to.
    path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults_at(config_path())
    }
}

impl AppConfig {
    fn defaults_at(path: PathBuf) -> Self {
        Self {
            bindings: Self::default_bindings(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            remove_stopwords: false,
            case_sensitive: false,
            strict_validation: true,
            bar_limit: DEFAULT_BAR_LIMIT,
            export_dir: PathBuf::from("."),
            path,
        }
    }

    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let alt = KeyModifiers::ALT;
        let mut m = HashMap::new();

        m.insert(Analyze, vec![KeyBind::new(F(5), n), KeyBind::new(Char('r'), ctrl)]);
        m.insert(Clear, vec![KeyBind::new(Char('l'), ctrl)]);
        m.insert(LoadSample, vec![KeyBind::new(Char('o'), ctrl)]);
        m.insert(ViewTable, vec![KeyBind::new(Char('1'), alt)]);
        m.insert(ViewBar, vec![KeyBind::new(Char('2'), alt)]);
        m.insert(ViewCloud, vec![KeyBind::new(Char('3'), alt)]);
        m.insert(CycleBarLimit, vec![KeyBind::new(Char('l'), alt)]);
        m.insert(ExportCsv, vec![KeyBind::new(F(6), n)]);
        m.insert(ExportJson, vec![KeyBind::new(F(7), n)]);
        m.insert(ToggleStopwords, vec![KeyBind::new(Char('s'), alt)]);
        m.insert(ToggleCaseSensitive, vec![KeyBind::new(Char('c'), alt)]);
        m.insert(OpenSettings, vec![KeyBind::new(F(2), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), ctrl)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match (shouldn't happen after conflict resolution), the one with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"F5/Ctrl+r"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: analyze | {}: sample | {}/{}/{}: views | {}/{}: export | Tab: focus | {}: settings",
            self.short_binding(Action::Analyze),
            self.short_binding(Action::LoadSample),
            self.short_binding(Action::ViewTable),
            self.short_binding(Action::ViewBar),
            self.short_binding(Action::ViewCloud),
            self.short_binding(Action::ExportCsv),
            self.short_binding(Action::ExportJson),
            self.short_binding(Action::OpenSettings),
        )
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        (self.request_timeout_secs > 0)
            .then(|| std::time::Duration::from_secs(self.request_timeout_secs))
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(config_path())
    }

    /// Load config from `path`, falling back to defaults for anything
    /// missing or unreadable.
    pub fn load_from(path: PathBuf) -> Self {
        let mut config = Self::defaults_at(path);
        match std::fs::read_to_string(&config.path) {
            Ok(contents) => config.apply(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("cannot read {}: {e}", config.path.display()),
        }
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.serialise())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overlay the settings found in `s` onto `self`.
    fn apply(&mut self, s: &str) {
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let unquoted = value.trim_matches('"');

            match key {
                "endpoint" => {
                    if !unquoted.is_empty() {
                        self.endpoint = unquoted.to_string();
                    }
                    continue;
                }
                "request_timeout_secs" => {
                    if let Ok(v) = value.parse::<u64>() {
                        self.request_timeout_secs = v.min(3600);
                    }
                    continue;
                }
                "remove_stopwords" => {
                    self.remove_stopwords = value == "true";
                    continue;
                }
                "case_sensitive" => {
                    self.case_sensitive = value == "true";
                    continue;
                }
                "strict_validation" => {
                    self.strict_validation = value != "false";
                    continue;
                }
                "bar_limit" => {
                    if let Ok(v) = value.parse::<usize>() {
                        if is_valid_limit(v) {
                            self.bar_limit = v;
                        }
                    }
                    continue;
                }
                "export_dir" => {
                    if !unquoted.is_empty() {
                        self.export_dir = PathBuf::from(unquoted);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                self.bindings.insert(action, parsed);
            }
        }
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# word-freq configuration".to_string(),
            String::new(),
            "# Analysis service".to_string(),
            format!("endpoint = \"{}\"", self.endpoint),
            format!("request_timeout_secs = {}", self.request_timeout_secs),
            format!("remove_stopwords = {}", self.remove_stopwords),
            format!("case_sensitive = {}", self.case_sensitive),
            format!("strict_validation = {}", self.strict_validation),
            String::new(),
            "# Display and export".to_string(),
            format!("bar_limit = {}", self.bar_limit),
            format!("export_dir = \"{}\"", self.export_dir.display()),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/word-freq/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("word-freq").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_expected_keys() {
        let config = AppConfig::defaults_at(PathBuf::from("unused"));
        assert_eq!(
            config.match_key(key(KeyCode::F(5), KeyModifiers::NONE)),
            Some(Action::Analyze)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('2'), KeyModifiers::ALT)),
            Some(Action::ViewBar)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('2'), KeyModifiers::NONE)), None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.bar_limit, 10);
    }

    #[test]
    fn parses_settings_and_bindings() {
        let mut config = AppConfig::defaults_at(PathBuf::from("unused"));
        config.apply(
            "# comment\n\
             endpoint = \"http://example.test/analyze\"\n\
             request_timeout_secs = 0\n\
             remove_stopwords = true\n\
             strict_validation = false\n\
             bar_limit = 20\n\
             export_dir = \"/tmp/out\"\n\
             analyze = Ctrl+Enter, F9\n",
        );
        assert_eq!(config.endpoint, "http://example.test/analyze");
        assert_eq!(config.request_timeout(), None);
        assert!(config.remove_stopwords);
        assert!(!config.case_sensitive);
        assert!(!config.strict_validation);
        assert_eq!(config.bar_limit, 20);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(
            config.bindings[&Action::Analyze],
            vec![
                KeyBind::new(KeyCode::Enter, KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(9), KeyModifiers::NONE),
            ]
        );
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let mut config = AppConfig::defaults_at(PathBuf::from("unused"));
        config.apply("bar_limit = 15\nrequest_timeout_secs = soon\nanalyze = Hyper+x\n");
        assert_eq!(config.bar_limit, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.bindings[&Action::Analyze].len(), 2);
    }

    #[test]
    fn rebinding_steals_key_from_other_action() {
        let mut config = AppConfig::defaults_at(PathBuf::from("unused"));
        let f6 = KeyBind::new(KeyCode::F(6), KeyModifiers::NONE);
        config.add_binding(Action::Analyze, f6.clone());
        assert!(config.bindings[&Action::ExportCsv].is_empty());
        assert_eq!(config.display_bindings(Action::ExportCsv), "unbound");
        assert_eq!(
            config.match_key(key(KeyCode::F(6), KeyModifiers::NONE)),
            Some(Action::Analyze)
        );
    }

    #[test]
    fn save_then_load_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::defaults_at(path.clone());
        config.case_sensitive = true;
        config.bar_limit = 50;
        config.export_dir = PathBuf::from("exports");
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Char('x'), KeyModifiers::ALT));
        config.save().unwrap();

        let loaded = AppConfig::load_from(path);
        assert!(loaded.case_sensitive);
        assert_eq!(loaded.bar_limit, 50);
        assert_eq!(loaded.export_dir, PathBuf::from("exports"));
        assert_eq!(loaded.bindings, config.bindings);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(dir.path().join("absent.toml"));
        assert_eq!(loaded.bindings, AppConfig::default_bindings());
        assert!(loaded.strict_validation);
    }
}
