//! Live API connection context.
//!
//! This module is split into:
//! - `provider.rs` - Context provider component owning the connection
//! - `websocket.rs` - WebSocket plumbing for the live session
//!
//! The page consumes the connection through [`LiveApiContext`]; the
//! session protocol itself stays behind that boundary.

mod provider;
mod websocket;

pub use provider::LiveApiProvider;

use shared::{LiveConfig, StreamingLog};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub(crate) type Subscribers = Rc<RefCell<Vec<(usize, Callback<StreamingLog>)>>>;

/// Tracks which socket generation owns the connection state.
///
/// Every connect attempt gets a fresh generation id, and socket events are
/// tagged with the id of the attempt that produced them. Events whose id is
/// not current are from a superseded socket (an overlapping connect click,
/// or a close that raced a reconnect) and must not touch the live session.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct SessionState {
    current: u64,
    active: bool,
}

impl SessionState {
    /// Begin a new connect attempt. Returns `None` while a session is
    /// already connecting or open.
    pub fn begin(&mut self) -> Option<u64> {
        if self.active {
            return None;
        }
        self.current += 1;
        self.active = true;
        Some(self.current)
    }

    /// Tear down the current session immediately. Late events from its
    /// socket stop being accepted, so a reconnect can start right away.
    pub fn supersede(&mut self) {
        self.current += 1;
        self.active = false;
    }

    /// Whether events tagged `id` belong to the live generation.
    pub fn accepts(&self, id: u64) -> bool {
        id == self.current
    }

    /// The socket for `id` ended on its own (close or error).
    pub fn ended(&mut self, id: u64) {
        if id == self.current {
            self.active = false;
        }
    }
}

/// Handle exposed through the Yew context.
///
/// `connected` and `config` are readouts; everything else forwards to the
/// provider. Cloning is cheap and handles stay valid across renders.
#[derive(Clone)]
pub struct LiveApiContext {
    pub connected: bool,
    pub config: LiveConfig,
    pub(crate) set_config_cb: Callback<LiveConfig>,
    pub(crate) connect_cb: Callback<()>,
    pub(crate) disconnect_cb: Callback<()>,
    pub(crate) send_text_cb: Callback<String>,
    pub(crate) subscribers: Subscribers,
    pub(crate) next_subscription_id: Rc<RefCell<usize>>,
}

impl PartialEq for LiveApiContext {
    fn eq(&self, other: &Self) -> bool {
        self.connected == other.connected
            && self.config == other.config
            && Rc::ptr_eq(&self.subscribers, &other.subscribers)
    }
}

impl LiveApiContext {
    pub fn connect(&self) {
        self.connect_cb.emit(());
    }

    pub fn disconnect(&self) {
        self.disconnect_cb.emit(());
    }

    /// Whole-object replace of the session configuration. Takes effect on
    /// the next `connect`.
    pub fn set_config(&self, next: LiveConfig) {
        self.set_config_cb.emit(next);
    }

    /// Fire-and-forget dispatch of a single text turn.
    pub fn send_text(&self, text: String) {
        self.send_text_cb.emit(text);
    }

    /// Subscribe to the streaming log. The returned guard keeps the
    /// subscription alive; dropping it unsubscribes, so holding it in an
    /// effect's cleanup closure scopes the subscription to the component's
    /// mounted lifetime.
    #[must_use]
    pub fn on_log(&self, callback: Callback<StreamingLog>) -> LogSubscription {
        let id = {
            let mut next = self.next_subscription_id.borrow_mut();
            *next += 1;
            *next
        };
        self.subscribers.borrow_mut().push((id, callback));
        LogSubscription {
            id,
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

/// RAII guard for a log subscription.
pub struct LogSubscription {
    id: usize,
    subscribers: Subscribers,
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_subscribers(subscribers: &Subscribers) -> LiveApiContext {
        LiveApiContext {
            connected: false,
            config: LiveConfig::default(),
            set_config_cb: Callback::noop(),
            connect_cb: Callback::noop(),
            disconnect_cb: Callback::noop(),
            send_text_cb: Callback::noop(),
            subscribers: Rc::clone(subscribers),
            next_subscription_id: Rc::new(RefCell::new(0)),
        }
    }

    #[test]
    fn test_overlapping_connect_attempts_are_blocked() {
        let mut session = SessionState::default();
        let first = session.begin().unwrap();
        // A second click before the socket opens must not start another
        // attempt.
        assert_eq!(session.begin(), None);
        assert!(session.accepts(first));
    }

    #[test]
    fn test_stale_close_does_not_touch_reconnected_session() {
        let mut session = SessionState::default();
        let old = session.begin().unwrap();

        // Disconnect, then reconnect before the old socket's close event
        // lands.
        session.supersede();
        let new = session.begin().unwrap();

        assert!(!session.accepts(old));
        assert!(session.accepts(new));

        // The old socket's deferred close is ignored and leaves the new
        // session connectable state intact.
        session.ended(old);
        assert!(session.accepts(new));
        assert_eq!(session.begin(), None);
    }

    #[test]
    fn test_reconnect_allowed_after_session_ends() {
        let mut session = SessionState::default();
        let id = session.begin().unwrap();
        session.ended(id);
        let next = session.begin().unwrap();
        assert_ne!(id, next);
        assert!(!session.accepts(id));
    }

    #[test]
    fn test_dropping_guard_unsubscribes() {
        let subscribers: Subscribers = Rc::new(RefCell::new(Vec::new()));
        let ctx = context_with_subscribers(&subscribers);

        let guard = ctx.on_log(Callback::noop());
        assert_eq!(subscribers.borrow().len(), 1);
        drop(guard);
        assert!(subscribers.borrow().is_empty());
    }

    #[test]
    fn test_guards_release_independently() {
        let subscribers: Subscribers = Rc::new(RefCell::new(Vec::new()));
        let ctx = context_with_subscribers(&subscribers);

        let first = ctx.on_log(Callback::noop());
        let second = ctx.on_log(Callback::noop());
        assert_eq!(subscribers.borrow().len(), 2);

        drop(first);
        assert_eq!(subscribers.borrow().len(), 1);
        drop(second);
        assert!(subscribers.borrow().is_empty());
    }
}
