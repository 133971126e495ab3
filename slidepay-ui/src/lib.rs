//! Host runtime primitives shared by the slidepay widgets.
//!
//! The widgets in `slidepay-components` are headless: they never open a
//! window or talk to a GPU. Instead the host application owns a
//! [`FrameClock`] that it advances once per display frame, forwards pointer
//! gestures, and draws the plain-data frames the widgets hand back.
//!
//! # Driving time
//!
//! ```
//! use std::time::Duration;
//! use slidepay_ui::FrameClock;
//!
//! let clock = FrameClock::new();
//! let _ticker = clock.on_frame(|now| {
//!     // sample animations at `now`
//!     let _ = now;
//! });
//! clock.advance_by(Duration::from_millis(16));
//! assert_eq!(clock.now(), Duration::from_millis(16));
//! ```
//!
//! Dropping the returned [`Subscription`] unregisters the callback, which is
//! how widgets stop their timers when they are unmounted.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod callback;
pub mod color;
pub mod dp;
pub mod emitter;
pub mod frame_clock;
pub mod logging;
mod subscription;

pub use crate::{
    callback::Callback,
    color::Color,
    dp::Dp,
    emitter::Emitter,
    frame_clock::{FrameClock, FrameTime},
    subscription::Subscription,
};
