//! Thread-safe front end publishing decoded events to listeners.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use super::{
    config::Config,
    event::{Event, MessageKind},
    listener::{ListenerId, Registry},
    machine::Machine,
    state::StateKind,
};

/// A decoder and the listeners it publishes to.
///
/// A transport feeds each received byte, in order, with [`Dispatcher::feed`].
/// When a byte completes a message, the decoder returns to waiting and the
/// event is then published to every matching listener before `feed` returns.
///
/// The decoder's lock is released before listeners run, so a listener may
/// feed bytes into the same dispatcher (for example, a loopback in tests) and
/// will find it waiting for a new frame. Listeners may be added and removed
/// from any thread at any time.
#[derive(Debug, Default)]
pub struct Dispatcher {
    machine: Mutex<Machine>,
    listeners: Registry,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            machine: Mutex::new(Machine::new(config)),
            listeners: Registry::default(),
        }
    }

    /// Consume a single byte received now.
    pub fn feed(&self, b: u8) {
        self.feed_at(b, Instant::now());
    }

    /// Consume a single byte received at `now`.
    pub fn feed_at(&self, b: u8, now: Instant) {
        let mut events = Vec::new();
        self.machine().advance(b, now, |e| events.push(e));

        for event in &events {
            log::debug!("publishing {:?} event", event.kind());
            self.listeners.publish(event);
        }
    }

    /// Consume a run of bytes received now, in order.
    pub fn feed_all(&self, bytes: &[u8]) {
        for &b in bytes {
            self.feed(b);
        }
    }

    /// Register a callback for events of one kind, or of every kind if
    /// `filter` is `None`.
    pub fn subscribe(
        &self,
        filter: Option<MessageKind>,
        callback: impl Fn(&Event) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(filter, callback)
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// The currently active state.
    pub fn state(&self) -> StateKind {
        self.machine().state()
    }

    /// A copy of the bytes accumulated by the active state so far.
    pub fn buffered(&self) -> Vec<u8> {
        self.machine().buffered().to_vec()
    }

    /// Drop any frame in progress and return to waiting, for example after
    /// the transport reconnects.
    pub fn reset(&self) {
        self.machine().reset();
    }

    fn machine(&self) -> MutexGuard<'_, Machine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
