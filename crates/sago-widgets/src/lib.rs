//! Widgets for the **sago** TUI framework.
//!
//! Every widget here implements [`sago_core::Component`], so it can be
//! embedded in any [`sago_core::Model`] and placed freely within
//! [`ratatui`] layouts.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`filter_select`] | Single-choice select narrowed by a debounced, highlighted text filter |

pub mod filter_select;
