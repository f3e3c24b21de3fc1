use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};

/// Timing and sizing of a [`FilterSelect`](super::FilterSelect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelectConfig {
    /// Quiet period after the last keystroke before the filter applies.
    pub debounce: Duration,
    /// How long an input blur waits for the list to take focus.
    pub blur_grace: Duration,
    /// Delay before focus on the proxy is forwarded to the filter input.
    pub proxy_focus_delay: Duration,
    /// Maximum list rows drawn at once.
    pub max_visible: usize,
}

impl Default for FilterSelectConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            blur_grace: Duration::from_millis(10),
            proxy_focus_delay: Duration::from_millis(20),
            max_visible: 8,
        }
    }
}

/// Style configuration for the filter select.
#[derive(Debug, Clone)]
pub struct FilterSelectStyle {
    /// Committed value shown in the proxy line.
    pub proxy: Style,
    /// Proxy line while nothing has been committed.
    pub placeholder: Style,
    /// Filter input text.
    pub input: Style,
    /// Cursor cell in the filter input.
    pub cursor: Style,
    /// Unselected list rows.
    pub item: Style,
    /// The row the list pointer is on.
    pub pointed_item: Style,
    /// Patched over the matched part of any highlighted text.
    pub highlight: Style,
    /// Border while some surface is focused.
    pub border_focused: Style,
    /// Border otherwise.
    pub border: Style,
}

impl Default for FilterSelectStyle {
    fn default() -> Self {
        Self {
            proxy: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            input: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            item: Style::default(),
            pointed_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            border_focused: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
        }
    }
}
