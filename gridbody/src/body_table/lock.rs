//! Table locking with same-thread re-entrancy detection.
//!
//! Model notifications run synchronously on the thread that made the change.
//! When that thread already holds the table (a row list changing widths
//! during render, a `with_body` closure touching a model), the notification
//! is queued and replayed in delivery order when the lock is released.
//! Notifications from other threads wait for the lock.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error};

use super::{Inner, ModelChange};

thread_local! {
    /// Tables locked by the current thread, by address.
    static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

pub(crate) struct Shared {
    inner: Mutex<Inner>,
    deferred: Mutex<Vec<ModelChange>>,
}

impl Shared {
    pub(crate) fn new(inner: Inner) -> Self {
        Self {
            inner: Mutex::new(inner),
            deferred: Mutex::new(Vec::new()),
        }
    }

    fn key(&self) -> usize {
        self as *const Self as usize
    }

    /// Whether the current thread holds this table.
    pub(crate) fn is_held_here(&self) -> bool {
        let key = self.key();
        HELD.with(|held| held.borrow().contains(&key))
    }

    /// Lock the table, waiting for other threads.
    ///
    /// Callers check [`is_held_here`](Self::is_held_here) first; locking twice
    /// on one thread deadlocks.
    pub(crate) fn lock(&self) -> Locked<'_> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        HELD.with(|held| held.borrow_mut().push(self.key()));
        Locked {
            shared: self,
            guard,
        }
    }

    /// Queue a change for the thread holding the table.
    pub(crate) fn defer(&self, change: ModelChange) {
        self.deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change);
    }

    fn take_deferred(&self) -> Vec<ModelChange> {
        std::mem::take(&mut *self.deferred.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Exclusive access to a table. Replays deferred changes on release.
pub(crate) struct Locked<'a> {
    shared: &'a Shared,
    guard: MutexGuard<'a, Inner>,
}

impl Deref for Locked<'_> {
    type Target = Inner;

    fn deref(&self) -> &Inner {
        &self.guard
    }
}

impl DerefMut for Locked<'_> {
    fn deref_mut(&mut self) -> &mut Inner {
        &mut self.guard
    }
}

impl Drop for Locked<'_> {
    fn drop(&mut self) {
        loop {
            let pending = self.shared.take_deferred();
            if pending.is_empty() || self.guard.destroyed {
                break;
            }
            let side = self.guard.shell.side();
            for change in pending {
                debug!("[body_table] {} pane: replaying {:?}", side, change);
                if let Err(err) = self.guard.handle_change(change) {
                    error!("[body_table] {} pane: {:?} failed: {}", side, change, err);
                }
            }
        }

        let key = self.shared.key();
        HELD.with(|held| {
            let mut held = held.borrow_mut();
            if let Some(index) = held.iter().rposition(|k| *k == key) {
                held.remove(index);
            }
        });
    }
}
