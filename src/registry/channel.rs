//! Channel-backed delivery for listeners.
//!
//! Wraps the callback surface in a bounded crossbeam channel so consumers
//! can pull notifications at their own pace instead of reacting inline.

use crate::listeners::{Listener, TypeFilter};
use crate::types::{Direction, Event, ListenerId, OwnerId};
use crossbeam_channel::{bounded, Receiver, TrySendError};
use std::time::Duration;
use tracing::{debug, trace};

/// One delivered event, as read from a [`ListenerHandle`].
#[derive(Clone, Debug)]
pub struct Notification<E, C> {
    /// The delivered event.
    pub event: E,
    /// The origin of the event.
    pub direction: Direction,
    /// The caller-defined context that accompanied the event.
    pub context: C,
}

/// Handle for consuming queued deliveries.
pub struct ListenerHandle<E, C> {
    /// Id of the underlying listener; pass to
    /// [`ListenerRegistry::remove`](super::ListenerRegistry::remove) to
    /// unsubscribe.
    pub id: ListenerId,
    /// Channel of delivered notifications.
    pub receiver: Receiver<Notification<E, C>>,
}

impl<E, C> ListenerHandle<E, C> {
    /// Receive the next notification (blocking).
    pub fn recv(&self) -> Result<Notification<E, C>, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a notification (non-blocking).
    pub fn try_recv(&self) -> Result<Notification<E, C>, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Notification<E, C>, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Build a listener whose callback queues matching events.
///
/// Queue overflow drops the notification for this queue only; the
/// listener still reports the event as delivered to its caller.
pub(crate) fn queued_listener<E, C>(
    owner: Option<OwnerId>,
    filter: TypeFilter,
    capacity: usize,
) -> (Listener<E, C>, Receiver<Notification<E, C>>)
where
    E: Event + Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    let (sender, receiver) = bounded(capacity);

    let mut builder = Listener::builder().filter(filter).on_event(
        move |event: &E, direction, context: &C| {
            let notification = Notification {
                event: event.clone(),
                direction,
                context: context.clone(),
            };
            match sender.try_send(notification) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    debug!(
                        event_type = event.event_type(),
                        "queue full, notification dropped"
                    );
                }
                Err(TrySendError::Disconnected(_)) => {
                    trace!(
                        event_type = event.event_type(),
                        "queue receiver gone, notification dropped"
                    );
                }
            }
        },
    );
    if let Some(owner) = owner {
        builder = builder.owner(owner);
    }

    let listener = builder.build().expect("queued listener sets a callback");
    (listener, receiver)
}
