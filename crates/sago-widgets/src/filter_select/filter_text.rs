//! Debounced, deduplicated filter text.
//!
//! Each keystroke replaces the pending value and bumps a generation counter;
//! the caller schedules a settle message carrying that generation. Only the
//! settle for the newest generation applies, so superseded keystrokes are
//! dropped without cancelling timers.

/// The filter text and its pending, not yet settled, replacement.
#[derive(Debug, Clone, Default)]
pub struct FilterText {
    current: String,
    pending: Option<String>,
    generation: u64,
}

impl FilterText {
    /// Empty filter text, so the full option list shows before any typing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The applied filter text.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Whether a keystroke is waiting for its debounce window.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke and return the generation to settle later.
    pub fn push(&mut self, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.pending = Some(text.into());
        self.generation
    }

    /// Apply the pending value if `generation` is still the newest one.
    ///
    /// Returns the new filter text when it changed; a stale generation or an
    /// unchanged value yields `None`.
    pub fn settle(&mut self, generation: u64) -> Option<&str> {
        if generation != self.generation {
            return None;
        }
        let text = self.pending.take()?;
        if text == self.current {
            return None;
        }
        self.current = text;
        Some(&self.current)
    }

    /// Back to the empty filter. Outstanding settles become stale.
    pub fn reset(&mut self) {
        self.current.clear();
        self.pending = None;
        self.generation += 1;
    }
}
