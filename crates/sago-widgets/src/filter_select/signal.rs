//! Raw view events and their classification into semantic signals.

use crossterm::event::KeyEvent;

use super::keys::FilterSelectKeys;

/// The three focusable parts of a filter select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// One-line display of the committed value; focusing it forwards focus
    /// to the filter input.
    Proxy,
    /// The filter text field.
    Input,
    /// The option list.
    List,
}

/// What happened on a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKind {
    Focus,
    Blur,
    /// A key was handled by the surface (text already edited, pointer
    /// already moved).
    KeyUp(KeyEvent),
    /// Text was inserted without a key, e.g. a bracketed paste.
    Paste,
    Click,
}

/// An event as the view reports it, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub surface: Surface,
    pub kind: RawKind,
}

impl RawEvent {
    pub fn new(surface: Surface, kind: RawKind) -> Self {
        Self { surface, kind }
    }

    pub fn focus(surface: Surface) -> Self {
        Self::new(surface, RawKind::Focus)
    }

    pub fn blur(surface: Surface) -> Self {
        Self::new(surface, RawKind::Blur)
    }

    pub fn click(surface: Surface) -> Self {
        Self::new(surface, RawKind::Click)
    }

    pub fn key_up(surface: Surface, key: KeyEvent) -> Self {
        Self::new(surface, RawKind::KeyUp(key))
    }
}

/// Semantic signals consumed by the filter pipeline, the visibility state
/// machine and the commit handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The filter input's text after a key, possibly unchanged.
    Keystroke(String),
    /// The user asked to move from the input into the list.
    FocusListRequested,
    FocusIn(Surface),
    FocusOut(Surface),
    /// Key or click on the proxy.
    ProxyActivated,
    /// Enter on the input or list, or a click on the list.
    Confirm,
    Dismiss,
}

/// Classify a raw event. `input_value` is the filter input's current text.
///
/// Confirm and move-to-list keys on the input never produce a keystroke.
pub fn normalize(event: &RawEvent, keys: &FilterSelectKeys, input_value: &str) -> Option<Signal> {
    use RawKind::*;
    use Surface::*;

    match (&event.surface, &event.kind) {
        (surface, Focus) => Some(Signal::FocusIn(*surface)),
        (surface, Blur) => Some(Signal::FocusOut(*surface)),

        (Proxy, KeyUp(_)) | (Proxy, Click) => Some(Signal::ProxyActivated),
        (Input, Paste) => Some(Signal::Keystroke(input_value.to_owned())),
        (_, Paste) => None,

        (Input, KeyUp(key)) if keys.confirm.matches(key) => Some(Signal::Confirm),
        (Input, KeyUp(key)) if keys.focus_list.matches(key) => Some(Signal::FocusListRequested),
        (Input, KeyUp(key)) if keys.dismiss.matches(key) => Some(Signal::Dismiss),
        (Input, KeyUp(_)) => Some(Signal::Keystroke(input_value.to_owned())),
        (Input, Click) => None,

        (List, KeyUp(key)) if keys.confirm.matches(key) => Some(Signal::Confirm),
        (List, KeyUp(key)) if keys.dismiss.matches(key) => Some(Signal::Dismiss),
        (List, KeyUp(_)) => None,
        (List, Click) => Some(Signal::Confirm),
    }
}
