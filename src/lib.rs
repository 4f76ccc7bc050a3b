//! # Herald
//!
//! In-process event notification for client SDKs: each listener binds an
//! owner, an event-type filter, and a callback, and a registry fans every
//! incoming event out to the listeners that asked for it.
//!
//! ## Core Concepts
//!
//! - **Listeners**: immutable owner + filter + callback bindings
//! - **Filters**: accept-all, or an exact set of event type names
//! - **Directions**: live (`Forwards`), paginated (`Backwards`), and
//!   initial-replay (`Sync`, never routed to listeners by the registry)
//! - **Registry**: owns listeners and offers each event to all of them
//!
//! ## Example
//!
//! ```ignore
//! use herald::{Direction, Event, Listener, ListenerRegistry};
//!
//! struct RoomEvent { kind: String }
//!
//! impl Event for RoomEvent {
//!     fn event_type(&self) -> &str { &self.kind }
//! }
//!
//! let registry = ListenerRegistry::new();
//! let id = registry.register(
//!     Listener::builder()
//!         .owner("timeline-view")
//!         .types(["m.room.message"])
//!         .on_event(|event: &RoomEvent, direction, _state: &()| {
//!             println!("{} ({:?})", event.kind, direction);
//!         })
//!         .build()?,
//! );
//!
//! let event = RoomEvent { kind: "m.room.message".into() };
//! registry.notify_all(&event, Direction::Forwards, &());
//!
//! registry.remove(id);
//! ```

pub mod error;
pub mod listeners;
pub mod registry;
pub mod types;

// Re-exports
pub use error::{ListenerError, Result};
pub use listeners::{Listener, ListenerBuilder, OnEvent, TypeFilter};
pub use registry::{ListenerHandle, ListenerRegistry, Notification};
pub use types::{Delivery, Direction, Event, ListenerId, OwnerId};
