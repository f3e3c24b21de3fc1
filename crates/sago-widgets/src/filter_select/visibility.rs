//! Open/closed state of the dropdown.
//!
//! Transitions are driven by signals only. Blurring the filter input does
//! not close the dropdown right away: clicking a list row or pressing the
//! move-to-list key blurs the input *before* the list gains focus, so the
//! decision is deferred by a short grace window and taken by sampling list
//! focus when the window ends. A proxy blur is treated the same way, since
//! the proxy normally hands focus to the input.

use super::signal::{Signal, Surface};

/// Whether the dropdown is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Closed,
    Open,
}

/// A pending blur decision. Hand the token back to
/// [`Visibility::resolve_blur`] once the grace window has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurCheck(pub u64);

/// The dropdown visibility state machine.
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    state: VisibilityState,
    list_focused: bool,
    pending: Option<u64>,
    epoch: u64,
}

impl Visibility {
    /// Closed, nothing focused, nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == VisibilityState::Open
    }

    /// Whether the list currently holds focus, as last reported.
    pub fn list_focused(&self) -> bool {
        self.list_focused
    }

    /// Apply a signal. Returns a [`BlurCheck`] when the input or proxy lost
    /// focus and the decision has to wait for the grace window.
    pub fn apply(&mut self, signal: &Signal) -> Option<BlurCheck> {
        match signal {
            Signal::FocusIn(Surface::Input) => {
                self.cancel_pending();
                self.transition(VisibilityState::Open, "input focused");
            }
            Signal::FocusIn(Surface::Proxy) | Signal::ProxyActivated => {
                self.transition(VisibilityState::Open, "proxy activated");
            }
            Signal::FocusIn(Surface::List) => {
                self.list_focused = true;
            }
            Signal::FocusOut(Surface::Input) | Signal::FocusOut(Surface::Proxy) => {
                self.epoch += 1;
                self.pending = Some(self.epoch);
                return Some(BlurCheck(self.epoch));
            }
            Signal::FocusOut(Surface::List) => {
                self.list_focused = false;
                self.cancel_pending();
                self.transition(VisibilityState::Closed, "list blurred");
            }
            Signal::Confirm => {
                self.cancel_pending();
                self.transition(VisibilityState::Closed, "confirmed");
            }
            Signal::Dismiss => {
                self.cancel_pending();
                self.transition(VisibilityState::Closed, "dismissed");
            }
            Signal::Keystroke(_) | Signal::FocusListRequested => {}
        }
        None
    }

    /// Decide a deferred blur: stay (or become) open if the list holds
    /// focus, close otherwise. Checks superseded by a later decision are
    /// ignored.
    pub fn resolve_blur(&mut self, check: BlurCheck) {
        if self.pending != Some(check.0) {
            tracing::trace!(epoch = check.0, "stale blur check ignored");
            return;
        }
        self.pending = None;
        if self.list_focused {
            self.transition(VisibilityState::Open, "focus moved to list");
        } else {
            self.transition(VisibilityState::Closed, "input blurred");
        }
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn transition(&mut self, to: VisibilityState, reason: &'static str) {
        if self.state != to {
            tracing::debug!(from = ?self.state, ?to, reason, "dropdown visibility changed");
            self.state = to;
        }
    }
}
