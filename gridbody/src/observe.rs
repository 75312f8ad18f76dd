//! Change notification primitives.
//!
//! External models publish their fields through `Observable`s and plain
//! notifications through `Signal`s. Listeners run synchronously, in
//! subscription order, on the thread that made the change. A `Subscription`
//! removes its listener when cancelled or dropped, so whoever holds it
//! controls the listener's lifetime.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

/// Listener callback.
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

type Listeners<T> = Mutex<Vec<(u64, Callback<T>)>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a registered listener.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the listener now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A notification channel with synchronous, ordered delivery.
pub struct Signal<T> {
    listeners: Arc<Listeners<T>>,
    next_id: Arc<AtomicU64>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register `callback`. It stays registered while the returned
    /// `Subscription` is alive.
    pub fn subscribe(&self, callback: Callback<T>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).push((id, callback));

        let listeners: Weak<Listeners<T>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                lock(&listeners).retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Deliver `value` to every listener in subscription order.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// cancel while being notified.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = lock(&self.listeners)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &lock(&self.listeners).len())
            .finish()
    }
}

/// A value that notifies listeners when it changes.
///
/// Setting an equal value is not a change and notifies nobody.
pub struct Observable<T> {
    value: Arc<RwLock<T>>,
    changed: Signal<T>,
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            changed: Signal::new(),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.value
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Set a new value. Returns whether listeners were notified.
    ///
    /// The value lock is released before listeners run, so they can read it.
    pub fn set(&self, value: T) -> bool {
        {
            let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
            if *guard == value {
                return false;
            }
            *guard = value.clone();
        }
        self.changed.emit(&value);
        true
    }

    /// Update the value using a closure. Returns whether it changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    pub fn subscribe(&self, callback: Callback<T>) -> Subscription {
        self.changed.subscribe(callback)
    }

    pub fn listener_count(&self) -> usize {
        self.changed.listener_count()
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            changed: self.changed.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Observable");
        match self.value.read() {
            Ok(value) => s.field("value", &*value),
            Err(_) => s.field("value", &"<poisoned>"),
        };
        s.field("changed", &self.changed).finish()
    }
}
