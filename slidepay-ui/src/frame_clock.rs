//! Host-driven frame clock.
//!
//! ## Usage
//!
//! The host advances the clock once per display frame; every registered
//! frame callback then samples its animations at the new time. Nothing in
//! the widgets reads the wall clock, which keeps animation fully
//! deterministic under test.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use tracing::warn;

use crate::Subscription;

/// Monotonic time since the host started driving the clock.
pub type FrameTime = Duration;

type FrameCallback = Arc<dyn Fn(FrameTime) + Send + Sync>;

new_key_type! {
    struct FrameCallbackId;
}

#[derive(Default)]
struct ClockInner {
    now: FrameTime,
    callbacks: SlotMap<FrameCallbackId, FrameCallback>,
}

/// Shared frame clock.
///
/// Cloning yields another handle to the same clock.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Arc<RwLock<ClockInner>>,
}

impl FrameClock {
    /// Creates a clock positioned at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current frame time.
    pub fn now(&self) -> FrameTime {
        self.inner.read().now
    }

    /// Registers a callback invoked on every advance with the new time.
    pub fn on_frame<F>(&self, callback: F) -> Subscription
    where
        F: Fn(FrameTime) + Send + Sync + 'static,
    {
        let id = self.inner.write().callbacks.insert(Arc::new(callback));
        let clock: Weak<RwLock<ClockInner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(clock) = clock.upgrade() {
                clock.write().callbacks.remove(id);
            }
        })
    }

    /// Moves the clock to `time` and runs every frame callback.
    ///
    /// Times earlier than the current one are ignored.
    pub fn advance_to(&self, time: FrameTime) {
        let ids: Vec<FrameCallbackId> = {
            let mut inner = self.inner.write();
            if time < inner.now {
                warn!(
                    now = ?inner.now,
                    requested = ?time,
                    "frame clock cannot move backwards"
                );
                return;
            }
            inner.now = time;
            inner.callbacks.keys().collect()
        };

        // Callbacks run unlocked and may register or cancel subscriptions.
        for id in ids {
            let callback = self.inner.read().callbacks.get(id).cloned();
            if let Some(callback) = callback {
                callback(time);
            }
        }
    }

    /// Advances the clock by `delta`.
    pub fn advance_by(&self, delta: Duration) {
        let next = self.now() + delta;
        self.advance_to(next);
    }

    /// Number of registered frame callbacks.
    pub fn listener_count(&self) -> usize {
        self.inner.read().callbacks.len()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("FrameClock")
            .field("now", &inner.now)
            .field("listeners", &inner.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_callbacks_receive_frame_time() {
        let clock = FrameClock::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = clock.on_frame(move |now| sink.lock().push(now));

        clock.advance_by(Duration::from_millis(16));
        clock.advance_to(Duration::from_millis(40));

        assert_eq!(
            *seen.lock(),
            vec![Duration::from_millis(16), Duration::from_millis(40)]
        );
    }

    #[test]
    fn test_dropping_subscription_stops_callbacks() {
        let clock = FrameClock::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = clock.on_frame(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        clock.advance_by(Duration::from_millis(16));
        assert_eq!(clock.listener_count(), 1);

        drop(sub);
        clock.advance_by(Duration::from_millis(16));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(clock.listener_count(), 0);
    }

    #[test]
    fn test_backwards_time_is_ignored() {
        let clock = FrameClock::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let _sub = clock.on_frame(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        clock.advance_to(Duration::from_millis(100));
        clock.advance_to(Duration::from_millis(50));
        assert_eq!(clock.now(), Duration::from_millis(100));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_cancelled_mid_frame_is_skipped() {
        let clock = FrameClock::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let victim_slot = Arc::clone(&victim);
        let _killer = clock.on_frame(move |_| {
            victim_slot.lock().take();
        });
        let counter = Arc::clone(&hits);
        *victim.lock() = Some(clock.on_frame(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        clock.advance_by(Duration::from_millis(16));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(clock.listener_count(), 1);
    }
}
