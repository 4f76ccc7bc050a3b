//! Event-type filter for listeners.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which event types a listener accepts.
///
/// The wildcard is its own variant rather than an empty collection, so
/// "accept everything" reads as [`TypeFilter::All`] at call sites instead
/// of hiding in a convention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    /// Accept every event type.
    All,

    /// Accept exactly the named types. Membership is exact string
    /// equality: no wildcards, no prefixes, case-sensitive. An empty set
    /// accepts nothing; build through [`TypeFilter::types`] to get the
    /// wildcard from an empty list instead.
    Only(HashSet<String>),
}

impl TypeFilter {
    /// Filter that accepts every event type.
    pub fn all() -> Self {
        TypeFilter::All
    }

    /// Filter that accepts the given event types.
    ///
    /// An empty list means no restriction and yields [`TypeFilter::All`].
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = types.into_iter().map(Into::into).collect();
        if set.is_empty() {
            TypeFilter::All
        } else {
            TypeFilter::Only(set)
        }
    }

    /// Whether an event of the given type passes this filter.
    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(types) => types.contains(event_type),
        }
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        TypeFilter::All
    }
}
