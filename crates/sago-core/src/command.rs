use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// A side effect returned from [`Model::update`](crate::Model::update),
/// [`Model::init`](crate::Model::init) or
/// [`Component::update`](crate::Component::update).
///
/// Commands are plain values: nothing happens until the runtime (or a test
/// harness) executes them. This keeps `update` synchronous and makes every
/// timing decision observable in tests.
///
/// # Examples
///
/// ```rust,ignore
/// // Do nothing:
/// let cmd = Command::none();
///
/// // Deliver a message after the debounce window:
/// let cmd = Command::after(Duration::from_millis(100), Msg::Settled(generation));
///
/// // Run an async task and map the result to a message:
/// let cmd = Command::perform(async { load().await }, Msg::Loaded);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    /// Deliver `msg` once `delay` has elapsed.
    Deferred {
        delay: Duration,
        msg: Msg,
    },
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Send a message immediately, before any deferred message is due.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Send a message once `delay` has elapsed.
    ///
    /// There is no cancellation handle. Callers that need last-write-wins
    /// semantics put a generation token in the message and ignore stale
    /// tokens when the message arrives.
    pub fn after(delay: Duration, msg: Msg) -> Self {
        Command {
            inner: CommandInner::Deferred { delay, msg },
        }
    }

    /// Run an async future, map the result to a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Quit,
        }
    }

    /// Execute several commands. Immediate messages are delivered in the
    /// order given.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.swap_remove(0),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Message(msg) => CommandInner::Message(f(msg)),
            CommandInner::Deferred { delay, msg } => CommandInner::Deferred {
                delay,
                msg: f(msg),
            },
            CommandInner::Future(fut) => {
                CommandInner::Future(Box::pin(async move { f(fut.await) }))
            }
            CommandInner::Batch(cmds) => CommandInner::Batch(
                cmds.into_iter().map(|cmd| cmd.map_with(f.clone())).collect(),
            ),
            CommandInner::Quit => CommandInner::Quit,
        };
        Command { inner }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command asks the program to quit.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// If this command is an immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a deferred message, return its delay and message.
    pub fn into_deferred(self) -> Option<(Duration, Msg)> {
        match self.inner {
            CommandInner::Deferred { delay, msg } => Some((delay, msg)),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }
}

impl<Msg: Send + 'static> Default for Command<Msg> {
    fn default() -> Self {
        Command::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn message_round_trips_through_inspection() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn after_keeps_delay() {
        let cmd: Command<&str> = Command::after(Duration::from_millis(10), "late");
        assert_eq!(
            cmd.into_deferred(),
            Some((Duration::from_millis(10), "late"))
        );
    }

    #[test]
    fn batch_drops_noops() {
        let cmd: Command<i32> = Command::batch([Command::none(), Command::none()]);
        assert!(cmd.is_none());

        let cmd: Command<i32> = Command::batch([Command::none(), Command::message(7)]);
        assert_eq!(cmd.into_message(), Some(7));
    }

    #[test]
    fn batch_multiple() {
        let cmd: Command<i32> = Command::batch([Command::message(1), Command::message(2)]);
        assert_eq!(cmd.into_batch().map(|cmds| cmds.len()), Some(2));
    }

    #[test]
    fn map_message() {
        let cmd: Command<i32> = Command::message(42);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_message().as_deref(), Some("42"));
    }

    #[test]
    fn map_deferred_keeps_delay() {
        let cmd: Command<i32> = Command::after(Duration::from_millis(100), 3);
        let mapped: Command<String> = cmd.map(|n| format!("#{n}"));
        let (delay, msg) = mapped.into_deferred().unwrap();
        assert_eq!(delay, Duration::from_millis(100));
        assert_eq!(msg, "#3");
    }

    #[test]
    fn map_quit_stays_quit() {
        let cmd: Command<i32> = Command::quit();
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert!(mapped.is_quit());
    }

    #[test]
    fn map_batch() {
        let cmd: Command<i32> = Command::batch([
            Command::message(1),
            Command::after(Duration::from_millis(5), 2),
        ]);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        let cmds = mapped.into_batch().unwrap();
        assert_eq!(cmds.len(), 2);
    }
}
