//! The listener record and its dispatch operation.

use crate::error::{ListenerError, Result};
use crate::types::{Delivery, Direction, Event, OwnerId};
use std::fmt;

use super::filter::TypeFilter;

/// Callback fired when an event passes a listener's filter.
///
/// Receives the event, its direction, and an opaque caller-defined
/// context object (e.g. a room-state snapshot). All three are borrowed;
/// the callback must not assume it may mutate them.
pub type OnEvent<E, C> = Box<dyn Fn(&E, Direction, &C) + Send + Sync + 'static>;

/// An immutable binding of an owner, a type filter, and a callback.
///
/// Listeners hold no mutable state: every [`notify`](Listener::notify)
/// call is independent, so a listener can be shared and notified from any
/// thread for its whole lifetime. Whoever holds the listener (normally a
/// [`ListenerRegistry`](crate::registry::ListenerRegistry)) owns that
/// lifetime; dropping it is the only form of unsubscription.
pub struct Listener<E, C> {
    /// Who registered this listener (equality-only token).
    owner: Option<OwnerId>,

    /// Which event types fire the callback.
    filter: TypeFilter,

    /// The callback itself.
    callback: OnEvent<E, C>,
}

impl<E, C> Listener<E, C> {
    /// Start building a listener.
    pub fn builder() -> ListenerBuilder<E, C> {
        ListenerBuilder::new()
    }

    /// The owner token supplied at construction, if any.
    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    /// The filter supplied at construction.
    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }
}

impl<E: Event, C> Listener<E, C> {
    /// Offer an event to this listener.
    ///
    /// Fires the callback synchronously on the calling thread when the
    /// event type passes the filter, and returns
    /// [`Delivery::Delivered`]; otherwise returns [`Delivery::Skipped`]
    /// without touching the callback. A skipped event is not an error,
    /// merely filtered out.
    ///
    /// The direction is passed through to the callback untouched; whether
    /// [`Direction::Sync`] events reach listeners at all is the dispatch
    /// loop's decision, not this method's.
    ///
    /// A panic inside the callback propagates to the caller; the listener
    /// itself stays usable afterwards.
    pub fn notify(&self, event: &E, direction: Direction, context: &C) -> Delivery {
        if !self.filter.matches(event.event_type()) {
            return Delivery::Skipped;
        }

        (self.callback)(event, direction, context);
        Delivery::Delivered
    }
}

impl<E, C> fmt::Debug for Listener<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("owner", &self.owner)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Listener`].
///
/// The callback is the only required field:
/// [`build`](ListenerBuilder::build) fails with
/// [`ListenerError::InvalidArgument`] without one. The owner defaults to
/// none and the filter to [`TypeFilter::All`].
pub struct ListenerBuilder<E, C> {
    owner: Option<OwnerId>,
    filter: TypeFilter,
    callback: Option<OnEvent<E, C>>,
}

impl<E, C> ListenerBuilder<E, C> {
    fn new() -> Self {
        Self {
            owner: None,
            filter: TypeFilter::All,
            callback: None,
        }
    }

    /// Attach an owner token, used for bulk removal by the registry.
    pub fn owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Use an explicit filter.
    pub fn filter(mut self, filter: TypeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Accept only the given event types (an empty list accepts all).
    pub fn types<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(TypeFilter::types(types))
    }

    /// Set the callback fired on matching events.
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(&E, Direction, &C) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Finish building.
    pub fn build(self) -> Result<Listener<E, C>> {
        let callback = self.callback.ok_or_else(|| {
            ListenerError::InvalidArgument("listener requires an on_event callback".to_string())
        })?;

        Ok(Listener {
            owner: self.owner,
            filter: self.filter,
            callback,
        })
    }
}
