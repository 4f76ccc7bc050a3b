//! Listener primitives: an event-type filter bound to a callback.
//!
//! A [`Listener`] is the unit the rest of the crate composes:
//! - An optional owner token, for later bulk removal
//! - A [`TypeFilter`] deciding which event types fire the callback
//! - The callback itself, invoked synchronously on match
//!
//! # Example
//!
//! ```ignore
//! let listener = Listener::builder()
//!     .owner("timeline-view")
//!     .types(["m.room.message", "m.room.member"])
//!     .on_event(|event: &RoomEvent, direction, state: &RoomState| {
//!         render(event, direction, state);
//!     })
//!     .build()?;
//!
//! match listener.notify(&event, Direction::Forwards, &state) {
//!     Delivery::Delivered => {}
//!     Delivery::Skipped => {} // filtered out, not an error
//! }
//! ```

mod filter;
mod listener;

pub use filter::TypeFilter;
pub use listener::{Listener, ListenerBuilder, OnEvent};
