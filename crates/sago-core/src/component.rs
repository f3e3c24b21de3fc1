use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) but its
/// [`view`](Component::view) receives an `area`, so a parent decides where
/// each child is drawn.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// lift commands with [`Command::map`]. Deferred commands keep their delay
/// when mapped, so a child's timers keep working inside any parent.
///
/// ```rust,ignore
/// use sago_core::{Command, Component, Model};
/// use sago_widgets::filter_select::{self, FilterSelect};
///
/// struct App { picker: FilterSelect }
///
/// enum AppMsg { Picker(filter_select::Message) }
///
/// impl Model for App {
///     // ...
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Picker(m) => self.picker.update(m).map(AppMsg::Picker),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle,
    /// except for overlays such as an open dropdown.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A parent can use this to decide which child receives keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
