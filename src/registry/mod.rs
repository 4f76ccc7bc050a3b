//! Registry that fans incoming events out to listeners.
//!
//! This module provides the dispatch side of the crate:
//! - Registering and removing listeners (by id or by owner)
//! - Offering each incoming event to every registered listener
//! - The convention that `Sync`-direction events bypass listeners
//! - Channel-backed delivery for consumers that prefer queues over
//!   callbacks
//!
//! # Example
//!
//! ```ignore
//! let registry = ListenerRegistry::new();
//!
//! // Callback delivery
//! let id = registry.register(
//!     Listener::builder()
//!         .owner("timeline-view")
//!         .types(["m.room.message"])
//!         .on_event(|event: &RoomEvent, direction, state: &RoomState| {
//!             render(event, direction, state);
//!         })
//!         .build()?,
//! );
//!
//! // Queue delivery
//! let handle = registry.subscribe_queued(None, TypeFilter::all(), 256);
//!
//! // One call per incoming event
//! registry.notify_all(&event, Direction::Forwards, &state);
//!
//! registry.remove(id);
//! registry.remove(handle.id);
//! ```

mod channel;
mod manager;

pub use channel::{ListenerHandle, Notification};
pub use manager::ListenerRegistry;
