//! Core runtime for **sago**.
//!
//! `sago-core` provides the traits, command values, runtime and test harness
//! behind every sago widget. The design follows the [Elm Architecture]: state
//! changes happen in a synchronous `update`, and side effects (including
//! timers) are returned as [`Command`] values.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view / event) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect: immediate or deferred message, async work, quit |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless, virtual-clock harness for a [`Model`] |
//! | [`ComponentHarness`](testing::ComponentHarness) | Same, for a single [`Component`] |
//!
//! # Timing
//!
//! Every wait in a sago application is a deferred message
//! ([`Command::after`]). Messages are applied one at a time, so there is no
//! shared-state locking; ordering is decided by when messages arrive. The
//! test harnesses replace wall-clock time with a virtual clock.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramHandle, ProgramOptions};

/// Run a sago application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
