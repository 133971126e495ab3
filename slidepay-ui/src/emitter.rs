//! Synchronous event emitter.
//!
//! ## Usage
//!
//! A producer owns an [`Emitter`] and calls [`Emitter::emit`]; consumers
//! register with [`Emitter::subscribe`] and keep the returned
//! [`Subscription`] alive for as long as they want events.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::Subscription;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct EmitterInner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Delivers values to subscribers in registration order.
///
/// Delivery is synchronous: `emit` returns after every listener has run.
/// Cloning yields another handle to the same listener list.
pub struct Emitter<T> {
    inner: Arc<Mutex<EmitterInner<T>>>,
}

impl<T: 'static> Emitter<T> {
    /// Creates an emitter without subscribers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EmitterInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers `listener` until the returned guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::new(listener)));
            id
        };
        let emitter: Weak<Mutex<EmitterInner<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(emitter) = emitter.upgrade() {
                emitter.lock().listeners.retain(|(other, _)| *other != id);
            }
        })
    }

    /// Delivers `value` to every current subscriber.
    ///
    /// Listeners run without the internal lock held, so they may subscribe or
    /// unsubscribe. A listener removed by an earlier one is skipped.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self.inner.lock().listeners.clone();
        for (id, listener) in snapshot {
            let still_subscribed = self
                .inner
                .lock()
                .listeners
                .iter()
                .any(|(other, _)| *other == id);
            if still_subscribed {
                listener(value);
            }
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
