//! **sago**: a searchable filter-select combobox for [`ratatui`], on an
//! Elm-style runtime.
//!
//! This umbrella crate re-exports everything needed to build a sago
//! application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! sago = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`sago_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`],
//!   [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`sago_widgets`].
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use sago::widgets::filter_select::{self, FilterSelect, SelectOption};
//! use sago::{Command, Component, Model, TerminalEvent};
//! use ratatui::Frame;
//!
//! struct App { picker: FilterSelect }
//! enum Msg { Picker(filter_select::Message) }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let mut picker = FilterSelect::new(vec![SelectOption::new("Ben", "BP")]);
//!         let focus = picker.focus().map(Msg::Picker);
//!         (App { picker }, focus)
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Picker(m) => self.picker.update(m).map(Msg::Picker),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.picker.view(frame, frame.area());
//!     }
//!     fn event(&self, event: TerminalEvent) -> Option<Msg> {
//!         match event {
//!             TerminalEvent::Key(key) => Some(Msg::Picker(filter_select::Message::KeyPress(key))),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     sago::run::<App>(()).await.unwrap();
//! }
//! ```

pub use sago_core::*;
pub mod widgets {
    pub use sago_widgets::*;
}

// Re-export dependencies for use in examples and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
