//! Listener registry and synchronous event delivery.
//!
//! Listeners are called on the emitting thread, in registration order.
//! Each call is isolated: a listener that panics is logged and skipped,
//! and the remaining listeners still receive the event. A misbehaving
//! listener can therefore never interrupt the engine halfway through
//! committing an action.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::error;

use super::event::GameEvent;

/// Handle returned by `EventBus::add_listener`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

type Listener<K> = Box<dyn FnMut(&GameEvent<K>)>;

/// Multicast delivery of `GameEvent`s.
pub struct EventBus<K> {
    listeners: Vec<(ListenerId, Listener<K>)>,
    next_id: u32,
}

impl<K> Default for EventBus<K> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K> std::fmt::Debug for EventBus<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<K> EventBus<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It receives every event emitted from now on.
    pub fn add_listener(&mut self, listener: impl FnMut(&GameEvent<K>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every listener. Returns how many listeners
    /// panicked.
    pub fn emit(&mut self, event: &GameEvent<K>) -> usize {
        let mut failures = 0;
        for (id, listener) in &mut self.listeners {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener(event))) {
                failures += 1;
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                error!(listener = id.0, event = event.name(), %message, "event listener panicked");
            }
        }
        failures
    }

    /// Deliver a batch of events in order.
    pub fn emit_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent<K>>) -> usize
    where
        K: 'a,
    {
        events.into_iter().map(|event| self.emit(event)).sum()
    }
}
