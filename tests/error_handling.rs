//! Error handling and edge case tests.

use herald::{
    Delivery, Direction, Event, Listener, ListenerError, ListenerId, ListenerRegistry, OwnerId,
    Result, TypeFilter,
};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct RoomEvent {
    kind: String,
}

impl Event for RoomEvent {
    fn event_type(&self) -> &str {
        &self.kind
    }
}

fn event(kind: &str) -> RoomEvent {
    RoomEvent {
        kind: kind.to_string(),
    }
}

// --- Construction Errors ---

#[test]
fn test_build_without_callback_is_invalid_argument() {
    let result: Result<Listener<RoomEvent, ()>> = Listener::builder()
        .owner("timeline-view")
        .types(["m.room.message"])
        .build();

    match result {
        Err(ListenerError::InvalidArgument(message)) => {
            assert!(message.contains("callback"));
        }
        Ok(_) => panic!("expected InvalidArgument"),
    }
}

#[test]
fn test_failed_build_leaves_no_partial_state() {
    let result: Result<Listener<RoomEvent, ()>> = Listener::builder().build();
    assert!(result.is_err());

    // Retrying the same construction with a callback succeeds.
    let listener: Listener<RoomEvent, ()> = Listener::builder()
        .on_event(|_, _, _| {})
        .build()
        .unwrap();
    assert_eq!(
        listener.notify(&event("m.room.message"), Direction::Forwards, &()),
        Delivery::Delivered
    );
}

#[test]
fn test_no_owner_and_no_filter_is_valid() {
    // Owner and filter have no validity constraints; only the callback
    // is required.
    let listener: Listener<RoomEvent, ()> = Listener::builder()
        .on_event(|_, _, _| {})
        .build()
        .unwrap();

    assert!(listener.owner().is_none());
    assert_eq!(listener.filter(), &TypeFilter::All);
}

#[test]
fn test_error_display() {
    let err = ListenerError::InvalidArgument("missing callback".to_string());
    assert_eq!(err.to_string(), "Invalid argument: missing callback");
}

// --- Callback Panics ---

#[test]
fn test_callback_panic_propagates_unmodified() {
    let listener: Listener<RoomEvent, ()> = Listener::builder()
        .on_event(|_, _, _| panic!("subscriber failure"))
        .build()
        .unwrap();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        listener.notify(&event("m.room.message"), Direction::Forwards, &())
    }));

    let payload = outcome.unwrap_err();
    let message = payload.downcast_ref::<&str>().unwrap();
    assert_eq!(*message, "subscriber failure");
}

#[test]
fn test_listener_usable_after_callback_panic() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let listener: Listener<RoomEvent, ()> = Listener::builder()
        .on_event(move |event: &RoomEvent, _, _: &()| {
            if event.kind == "poison" {
                panic!("poisoned event");
            }
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let poisoned = catch_unwind(AssertUnwindSafe(|| {
        listener.notify(&event("poison"), Direction::Forwards, &())
    }));
    assert!(poisoned.is_err());

    // The listener holds no mutable state, so a panic cannot corrupt it.
    let outcome = listener.notify(&event("m.room.message"), Direction::Forwards, &());
    assert_eq!(outcome, Delivery::Delivered);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_registry_survives_panicking_subscriber() {
    let registry: Arc<ListenerRegistry<RoomEvent, ()>> = Arc::new(ListenerRegistry::new());

    registry.register(
        Listener::builder()
            .types(["poison"])
            .on_event(|_: &RoomEvent, _, _: &()| panic!("poisoned event"))
            .build()
            .unwrap(),
    );
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    registry.register(
        Listener::builder()
            .types(["m.room.message"])
            .on_event(move |_: &RoomEvent, _, _: &()| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap(),
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        registry.notify_all(&event("poison"), Direction::Forwards, &())
    }));
    assert!(outcome.is_err());

    // Both registrations, including the panicking one, are still held;
    // suppressing or evicting a failing subscriber is the caller's call.
    assert_eq!(registry.listener_count(), 2);
    let delivered = registry.notify_all(&event("m.room.message"), Direction::Forwards, &());
    assert_eq!(delivered, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// --- Removal Edge Cases ---

#[test]
fn test_remove_unknown_id_is_noop() {
    let registry: ListenerRegistry<RoomEvent, ()> = ListenerRegistry::new();
    assert!(!registry.remove(ListenerId(999)));
}

#[test]
fn test_remove_by_unknown_owner_removes_nothing() {
    let registry: ListenerRegistry<RoomEvent, ()> = ListenerRegistry::new();
    registry.register(
        Listener::builder()
            .owner("timeline-view")
            .on_event(|_: &RoomEvent, _, _: &()| {})
            .build()
            .unwrap(),
    );

    assert_eq!(registry.remove_by_owner(&OwnerId::from("member-list")), 0);
    assert_eq!(registry.listener_count(), 1);
}

#[test]
fn test_callback_may_register_new_listener() {
    let registry: Arc<ListenerRegistry<RoomEvent, ()>> = Arc::new(ListenerRegistry::new());
    let late_hits = Arc::new(AtomicUsize::new(0));

    let reentrant = Arc::clone(&registry);
    let late_counter = Arc::clone(&late_hits);
    registry.register(
        Listener::builder()
            .types(["m.room.create"])
            .on_event(move |_: &RoomEvent, _, _: &()| {
                let counter = Arc::clone(&late_counter);
                reentrant.register(
                    Listener::builder()
                        .on_event(move |_: &RoomEvent, _, _: &()| {
                            counter.fetch_add(1, Ordering::SeqCst);
                        })
                        .build()
                        .unwrap(),
                );
            })
            .build()
            .unwrap(),
    );

    // The registration happens mid-dispatch without deadlocking; the new
    // listener only sees events from the next dispatch on.
    let delivered = registry.notify_all(&event("m.room.create"), Direction::Forwards, &());
    assert_eq!(delivered, 1);
    assert_eq!(late_hits.load(Ordering::SeqCst), 0);

    registry.notify_all(&event("m.room.message"), Direction::Forwards, &());
    assert_eq!(late_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_removal_mid_dispatch_keeps_current_snapshot() {
    let registry: Arc<ListenerRegistry<RoomEvent, ()>> = Arc::new(ListenerRegistry::new());
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    // First listener removes everything owned by "victim" while the
    // dispatch that reached it is still iterating its snapshot.
    let reentrant = Arc::clone(&registry);
    let log = Arc::clone(&order);
    registry.register(
        Listener::builder()
            .on_event(move |_: &RoomEvent, _, _: &()| {
                log.lock().push("remover");
                reentrant.remove_by_owner(&OwnerId::from("victim"));
            })
            .build()
            .unwrap(),
    );
    let log = Arc::clone(&order);
    registry.register(
        Listener::builder()
            .owner("victim")
            .on_event(move |_: &RoomEvent, _, _: &()| {
                log.lock().push("victim");
            })
            .build()
            .unwrap(),
    );

    registry.notify_all(&event("m.room.message"), Direction::Forwards, &());

    // The snapshot taken at dispatch start still includes the victim for
    // this event; only later events skip it.
    assert_eq!(order.lock().len(), 2);
    assert_eq!(registry.listener_count(), 1);

    registry.notify_all(&event("m.room.message"), Direction::Forwards, &());
    let seen = order.lock();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2], "remover");
}
