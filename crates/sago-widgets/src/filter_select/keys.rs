//! Key bindings recognised by the filter select.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single key press with the modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// A key with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key with Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// One action and the keys that trigger it.
#[derive(Debug, Clone)]
pub struct Binding {
    pub keys: Vec<KeyCombination>,
    /// Short label for help lines, e.g. `"select"`.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

impl Binding {
    /// Bind a single key combination.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Bind several key combinations to the same action.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Builder-style toggle.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether `event` triggers this binding.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    /// Label of the first key, e.g. `"Enter"` or `"Ctrl+N"`.
    pub fn key_label(&self) -> String {
        let Some(key) = self.keys.first() else {
            return String::new();
        };
        let code = match key.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            other => other.to_string(),
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{code}")
        } else {
            code
        }
    }
}

/// The keys the filter select reacts to.
#[derive(Debug, Clone)]
pub struct FilterSelectKeys {
    /// Commit the pointed-to option (input or list focused).
    pub confirm: Binding,
    /// Move focus from the filter input into the list.
    pub focus_list: Binding,
    /// Close the dropdown without committing.
    pub dismiss: Binding,
    /// Move focus to the next surface.
    pub next_surface: Binding,
    /// Move focus to the previous surface.
    pub prev_surface: Binding,
}

impl Default for FilterSelectKeys {
    fn default() -> Self {
        Self {
            confirm: Binding::new(KeyCombination::new(KeyCode::Enter), "select"),
            focus_list: Binding::new(KeyCombination::new(KeyCode::Down), "to list"),
            dismiss: Binding::new(KeyCombination::new(KeyCode::Esc), "close"),
            next_surface: Binding::new(KeyCombination::new(KeyCode::Tab), "next"),
            prev_surface: Binding::new(KeyCombination::new(KeyCode::BackTab), "previous"),
        }
    }
}

impl FilterSelectKeys {
    /// Bindings worth showing in a one-line help bar.
    pub fn short_help(&self) -> Vec<&Binding> {
        [&self.focus_list, &self.confirm, &self.dismiss, &self.next_surface]
            .into_iter()
            .filter(|b| b.enabled)
            .collect()
    }
}
