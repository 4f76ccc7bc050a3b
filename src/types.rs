//! Core types for the listener core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimal surface the dispatch layer needs from a domain event.
///
/// The SDK that owns the event schema implements this for its event
/// type; the core only ever reads the type name.
pub trait Event {
    /// Type name used for filter matching, e.g. `"m.room.message"`.
    fn event_type(&self) -> &str;
}

/// Provenance of an event offered to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// New events coming down the live stream.
    Forwards,

    /// Old events requested through back-pagination.
    Backwards,

    /// Events replayed while building initial state. The dispatch loop
    /// does not route these to listeners; see
    /// [`ListenerRegistry::notify_all`](crate::registry::ListenerRegistry::notify_all).
    Sync,
}

/// Outcome of offering a single event to a single listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// The event passed the filter and the callback ran.
    Delivered,

    /// The event was filtered out; the callback did not run.
    Skipped,
}

impl Delivery {
    /// True if the callback ran.
    pub fn is_delivered(self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// Opaque identity of the code that registered a listener.
///
/// Compared for equality when removing listeners in bulk; never
/// interpreted beyond that.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        OwnerId(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        OwnerId(s)
    }
}

/// Unique identifier for a registered listener (assigned by the registry).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({})", self.0)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
