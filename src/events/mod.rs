//! Event types and delivery.
//!
//! The engine collects events while it works on an action and delivers
//! them only after the action is committed to the caller's state, so a
//! listener always observes the state the event describes.

mod bus;
mod event;

pub use bus::{EventBus, ListenerId};
pub use event::GameEvent;
