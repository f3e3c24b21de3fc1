//! Headless harnesses for driving models and components in plain `#[test]`s.
//!
//! Both harnesses run on a **virtual clock**: deferred commands
//! ([`Command::after`]) are queued with a deadline and only fire when the
//! test calls `advance`. Timing-sensitive behavior (debounce windows, grace
//! periods) can therefore be tested deterministically and without tokio.

use std::collections::VecDeque;
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::command::{Command, CommandInner};
use crate::component::Component;
use crate::model::Model;

struct Timer<Msg> {
    due: Duration,
    seq: u64,
    msg: Msg,
}

/// Message queue and timer wheel shared by the harnesses.
struct VirtualClock<Msg> {
    now: Duration,
    seq: u64,
    ready: VecDeque<Msg>,
    timers: Vec<Timer<Msg>>,
    quit: bool,
}

impl<Msg: Send + 'static> VirtualClock<Msg> {
    fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            ready: VecDeque::new(),
            timers: Vec::new(),
            quit: false,
        }
    }

    fn schedule(&mut self, cmd: Command<Msg>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.ready.push_back(msg),
            CommandInner::Deferred { delay, msg } => {
                self.seq += 1;
                self.timers.push(Timer {
                    due: self.now + delay,
                    seq: self.seq,
                    msg,
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.schedule(cmd);
                }
            }
            CommandInner::Quit => self.quit = true,
            // Async work can't be driven without an executor.
            CommandInner::Future(_) => {}
        }
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Timers with equal deadlines fire in scheduling order.
    fn pop_due(&mut self, until: Duration) -> Option<Msg> {
        let (idx, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))?;
        let timer = self.timers.swap_remove(idx);
        self.now = self.now.max(timer.due);
        Some(timer.msg)
    }
}

/// Shared driving loop: deliver ready messages, then due timers, until
/// `until` is reached.
macro_rules! drive {
    ($self:ident, $until:expr, $deliver:expr) => {{
        let until = $until;
        loop {
            if let Some(msg) = $self.clock.ready.pop_front() {
                let cmd = $deliver(&mut *$self, msg);
                $self.clock.schedule(cmd);
                continue;
            }
            match $self.clock.pop_due(until) {
                Some(msg) => {
                    let cmd = $deliver(&mut *$self, msg);
                    $self.clock.schedule(cmd);
                }
                None => break,
            }
        }
        $self.clock.now = $self.clock.now.max(until);
    }};
}

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// # Example
///
/// ```rust,ignore
/// use sago_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<App>::new(());
/// prog.send(Msg::Key(key('b')));
/// prog.advance(Duration::from_millis(100));   // debounce window elapses
/// assert!(prog.render_string(40, 10).contains("Ben"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    clock: VirtualClock<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    ///
    /// Immediate messages produced by `init` are delivered right away.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            clock: VirtualClock::new(),
        };
        program.clock.schedule(init_cmd);
        program.drain_messages();
        program
    }

    /// Deliver a message, then every immediate message it triggers.
    ///
    /// Deferred messages are queued on the virtual clock; see
    /// [`advance`](TestProgram::advance).
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.clock.schedule(cmd);
        self.drain_messages();
    }

    /// Process all queued immediate messages without moving the clock.
    pub fn drain_messages(&mut self) {
        let now = self.clock.now;
        drive!(self, now, |p: &mut Self, msg| p.model.update(msg));
    }

    /// Move the virtual clock forward, firing every deferred message whose
    /// deadline falls inside the window.
    pub fn advance(&mut self, by: Duration) {
        let until = self.clock.now + by;
        drive!(self, until, |p: &mut Self, msg| p.model.update(msg));
    }

    /// Time elapsed on the virtual clock since creation.
    pub fn elapsed(&self) -> Duration {
        self.clock.now
    }

    /// Number of deferred messages not yet delivered.
    pub fn pending_timers(&self) -> usize {
        self.clock.timers.len()
    }

    /// Whether any command so far asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.clock.quit
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_buffer(width, height, |frame| self.model.view(frame))
    }

    /// Render the model and return the visible content as a plain string.
    ///
    /// Rows are separated by newlines.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

/// A headless harness for a single [`Component`].
///
/// Works like [`TestProgram`], but additionally records every message that
/// came out of a command (as opposed to being sent by the test), so output
/// events can be asserted on with [`emitted`](ComponentHarness::emitted).
pub struct ComponentHarness<C: Component> {
    component: C,
    clock: VirtualClock<C::Message>,
    emitted: Vec<C::Message>,
}

impl<C> ComponentHarness<C>
where
    C: Component,
    C::Message: Clone,
{
    /// Wrap a component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            clock: VirtualClock::new(),
            emitted: Vec::new(),
        }
    }

    /// Deliver a message, then every immediate message it triggers.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.clock.schedule(cmd);
        let now = self.clock.now;
        drive!(self, now, Self::deliver);
    }

    /// Move the virtual clock forward, firing due deferred messages.
    pub fn advance(&mut self, by: Duration) {
        let until = self.clock.now + by;
        drive!(self, until, Self::deliver);
    }

    fn deliver(&mut self, msg: C::Message) -> Command<C::Message> {
        self.emitted.push(msg.clone());
        self.component.update(msg)
    }

    /// Messages produced by commands so far, in delivery order.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    /// Forget recorded messages.
    pub fn clear_emitted(&mut self) {
        self.emitted.clear();
    }

    /// Time elapsed on the virtual clock since creation.
    pub fn elapsed(&self) -> Duration {
        self.clock.now
    }

    /// Number of deferred messages not yet delivered.
    pub fn pending_timers(&self) -> usize {
        self.clock.timers.len()
    }

    /// Shared access to the component.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component, bypassing the message cycle.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component into the given area of a `width` x `height` buffer.
    pub fn render(&self, width: u16, height: u16, area: Rect) -> Buffer {
        render_buffer(width, height, |frame| self.component.view(frame, area))
    }

    /// Render and return the visible content as a plain string.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        buffer_to_string(&self.render(width, height, area))
    }
}

fn render_buffer(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> Buffer {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test backend never fails");
    terminal.draw(draw).expect("test backend never fails");
    terminal.backend().buffer().clone()
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
