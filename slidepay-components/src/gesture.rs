//! Horizontal drag gestures delivered by the host.
//!
//! ## Usage
//!
//! The host's pan recogniser forwards its state changes to a [`DragSource`];
//! a mounted slider subscribes to it and reacts in arrival order.

use slidepay_ui::{Emitter, Subscription};

/// A pan gesture state change.
///
/// `translation_x` is the total horizontal displacement since the gesture
/// began, in dp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// A finger went down on the thumb.
    Began,
    /// The finger moved.
    Moved {
        /// Displacement since `Began`.
        translation_x: f32,
    },
    /// The finger lifted.
    Ended {
        /// Displacement since `Began` at release.
        translation_x: f32,
    },
    /// The host aborted the gesture.
    Cancelled,
}

/// Host-facing emitter of [`DragEvent`]s.
#[derive(Clone, Default)]
pub struct DragSource {
    events: Emitter<DragEvent>,
}

impl DragSource {
    /// Creates a source without subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every subscriber.
    pub fn emit(&self, event: DragEvent) {
        self.events.emit(&event);
    }

    /// Registers `listener` until the returned guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&DragEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }
}
