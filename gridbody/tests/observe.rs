use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gridbody::prelude::*;

fn collect<T: Clone + Send + 'static>(log: &Arc<Mutex<Vec<T>>>) -> Callback<T> {
    let log = Arc::clone(log);
    Arc::new(move |value: &T| log.lock().unwrap().push(value.clone()))
}

// ============================================================================
// Signal
// ============================================================================

#[test]
fn test_signal_delivers_in_subscription_order() {
    let signal = Signal::<&'static str>::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = {
        let log = Arc::clone(&log);
        signal.subscribe(Arc::new(move |v: &&str| log.lock().unwrap().push(format!("1:{v}"))))
    };
    let second = {
        let log = Arc::clone(&log);
        signal.subscribe(Arc::new(move |v: &&str| log.lock().unwrap().push(format!("2:{v}"))))
    };

    signal.emit(&"x");
    assert_eq!(*log.lock().unwrap(), vec!["1:x", "2:x"]);
    assert_eq!(signal.listener_count(), 2);

    drop(first);
    drop(second);
    assert_eq!(signal.listener_count(), 0);
}

#[test]
fn test_subscription_cancel() {
    let signal = Signal::<u32>::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let subscription = signal.subscribe(collect(&log));

    signal.emit(&1);
    subscription.cancel();
    signal.emit(&2);

    assert_eq!(*log.lock().unwrap(), vec![1]);
    assert_eq!(signal.listener_count(), 0);
}

#[test]
fn test_subscription_outlives_signal() {
    let signal = Signal::<u32>::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let subscription = signal.subscribe(collect(&log));

    drop(signal);
    drop(subscription);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_listener_may_unsubscribe_during_emit() {
    let signal = Signal::<()>::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let subscription = {
        let calls = Arc::clone(&calls);
        let slot = Arc::clone(&slot);
        signal.subscribe(Arc::new(move |_: &()| {
            calls.fetch_add(1, Ordering::SeqCst);
            slot.lock().unwrap().take();
        }))
    };
    *slot.lock().unwrap() = Some(subscription);

    signal.emit(&());
    signal.emit(&());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(signal.listener_count(), 0);
}

#[test]
fn test_clones_share_listeners() {
    let signal = Signal::<u8>::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let _subscription = signal.subscribe(collect(&log));

    signal.clone().emit(&7);
    assert_eq!(*log.lock().unwrap(), vec![7]);
}

// ============================================================================
// Observable
// ============================================================================

#[test]
fn test_observable_notifies_on_change_only() {
    let value = Observable::new(0usize);
    let log = Arc::new(Mutex::new(Vec::new()));
    let _subscription = value.subscribe(collect(&log));

    assert!(value.set(3));
    assert!(!value.set(3));
    assert!(value.update(|v| *v += 1));
    assert!(!value.update(|_| {}));

    assert_eq!(value.get(), 4);
    assert_eq!(*log.lock().unwrap(), vec![3, 4]);
}

#[test]
fn test_listener_can_read_new_value() {
    let value = Observable::new(String::from("a"));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let _subscription = {
        let reader = value.clone();
        let seen = Arc::clone(&seen);
        value.subscribe(Arc::new(move |_: &String| seen.lock().unwrap().push(reader.get())))
    };

    value.set("b".to_string());
    assert_eq!(*seen.lock().unwrap(), vec!["b".to_string()]);
}

#[test]
fn test_observable_default() {
    let value = Observable::<u32>::default();
    assert_eq!(value.get(), 0);
    assert_eq!(value.listener_count(), 0);
}
