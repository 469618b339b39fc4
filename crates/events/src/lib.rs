//! Change-notification plumbing for store dependents.
//!
//! The shop store publishes an event after every committed mutation; derived
//! views (debt summaries, stat tiles) subscribe and recompute. Subscribers
//! never mutate — the store is the single writer.

pub mod bus;
pub mod event;

pub use bus::{EventBus, InMemoryBusError, InMemoryEventBus, Subscription};
pub use event::Event;
