use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};

/// Terminal events delivered to [`Model::event`](crate::Model::event).
///
/// Each variant wraps the corresponding crossterm payload, so key codes,
/// modifiers and mouse buttons can be matched with the full crossterm API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press or repeat. Releases are filtered out by the runtime.
    Key(KeyEvent),
    /// A mouse event (only delivered when mouse capture is enabled).
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Convert a crossterm event, dropping key releases.
    ///
    /// Terminals that report releases would otherwise deliver every
    /// keystroke twice.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::Event;

        Some(match event {
            Event::Key(k) if k.kind == KeyEventKind::Release => return None,
            Event::Key(k) => TerminalEvent::Key(k),
            Event::Mouse(m) => TerminalEvent::Mouse(m),
            Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            Event::FocusGained => TerminalEvent::FocusGained,
            Event::FocusLost => TerminalEvent::FocusLost,
            Event::Paste(s) => TerminalEvent::Paste(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn press_is_kept() {
        let ev = TerminalEvent::from_crossterm(Event::Key(key(KeyEventKind::Press)));
        assert_eq!(ev, Some(TerminalEvent::Key(key(KeyEventKind::Press))));
    }

    #[test]
    fn release_is_dropped() {
        let ev = TerminalEvent::from_crossterm(Event::Key(key(KeyEventKind::Release)));
        assert_eq!(ev, None);
    }

    #[test]
    fn resize_passes_through() {
        let ev = TerminalEvent::from_crossterm(Event::Resize(80, 24));
        assert_eq!(ev, Some(TerminalEvent::Resize(80, 24)));
    }
}
