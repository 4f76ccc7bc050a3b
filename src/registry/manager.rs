//! Listener registry: stores listeners and notifies them about events.

use crate::listeners::{Listener, TypeFilter};
use crate::types::{Direction, Event, ListenerId, OwnerId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

use super::channel::{queued_listener, ListenerHandle};

/// Holds registered listeners and offers each incoming event to them.
///
/// This is the dispatch loop the listener primitive is written for: the
/// transport that produces events calls
/// [`notify_all`](ListenerRegistry::notify_all) once per event, and the
/// registry consults every listener it holds.
///
/// Callbacks always run outside the registry lock, on a snapshot of the
/// current listeners, so a callback may register or remove listeners
/// (including its own registration) while it runs.
pub struct ListenerRegistry<E, C> {
    /// Registered listeners by id.
    listeners: RwLock<HashMap<ListenerId, Arc<Listener<E, C>>>>,

    /// Counter for generating listener ids.
    next_id: AtomicU64,
}

impl<E, C> ListenerRegistry<E, C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a listener, returning the id that later removes it.
    pub fn register(&self, listener: Listener<E, C>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.write().insert(id, Arc::new(listener));
        debug!(listener = %id, "listener registered");
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let removed = self.listeners.write().remove(&id).is_some();
        if removed {
            debug!(listener = %id, "listener removed");
        }
        removed
    }

    /// Remove every listener registered with the given owner token.
    ///
    /// Returns how many were removed. Listeners registered without an
    /// owner are never touched by this.
    pub fn remove_by_owner(&self, owner: &OwnerId) -> usize {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|_, listener| listener.owner() != Some(owner));
        let removed = before - listeners.len();
        if removed > 0 {
            debug!(%owner, removed, "listeners removed by owner");
        }
        removed
    }

    /// Drop all listeners.
    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl<E: Event, C> ListenerRegistry<E, C> {
    /// Offer an event to every registered listener.
    ///
    /// Returns how many listeners the event was delivered to (i.e. whose
    /// callbacks ran). Events with [`Direction::Sync`] are part of
    /// initial-state replay and are never routed to listeners; for those
    /// this returns 0 without consulting anyone. Listeners wanting the
    /// ordinary matching rule applied to a Sync event can be notified
    /// directly through [`Listener::notify`].
    ///
    /// No ordering is guaranteed across listeners. Each single listener
    /// observes calls in the order they are issued here. A panicking
    /// callback propagates to the caller; listeners not yet reached in
    /// that iteration are not consulted.
    pub fn notify_all(&self, event: &E, direction: Direction, context: &C) -> usize {
        if direction == Direction::Sync {
            trace!(
                event_type = event.event_type(),
                "sync event, listeners not consulted"
            );
            return 0;
        }

        // Snapshot so callbacks run without the lock held.
        let snapshot: Vec<Arc<Listener<E, C>>> =
            self.listeners.read().values().cloned().collect();

        let mut delivered = 0;
        for listener in snapshot {
            if listener.notify(event, direction, context).is_delivered() {
                delivered += 1;
            }
        }
        delivered
    }
}

impl<E, C> ListenerRegistry<E, C>
where
    E: Event + Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    /// Subscribe with a bounded queue instead of a callback.
    ///
    /// Each matching event is cloned into the queue as a
    /// [`Notification`](super::Notification); read it from the returned
    /// handle. When the queue is full the notification is dropped for
    /// this queue only, other listeners are unaffected. The handle does
    /// not unsubscribe on drop; pass [`ListenerHandle::id`] to
    /// [`remove`](ListenerRegistry::remove) when done.
    pub fn subscribe_queued(
        &self,
        owner: Option<OwnerId>,
        filter: TypeFilter,
        capacity: usize,
    ) -> ListenerHandle<E, C> {
        let (listener, receiver) = queued_listener(owner, filter, capacity);
        let id = self.register(listener);
        ListenerHandle { id, receiver }
    }
}

impl<E, C> Default for ListenerRegistry<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
