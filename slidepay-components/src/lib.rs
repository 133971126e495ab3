//! Slide-to-pay confirmation control and shimmer background.
//!
//! # Usage
//!
//! The host owns a [`FrameClock`](slidepay_ui::FrameClock) and a
//! [`DragSource`](gesture::DragSource), mounts the widget, forwards pan
//! events, advances the clock once per display frame and draws whatever
//! [`SlideToPay::frame`](slide_to_pay::SlideToPay::frame) returns.
//!
//! ```
//! use std::sync::{
//!     Arc,
//!     atomic::{AtomicBool, Ordering},
//! };
//! use std::time::Duration;
//!
//! use slidepay_components::{
//!     gesture::{DragEvent, DragSource},
//!     slide_to_pay::{SlideToPay, SlideToPayArgs, Viewport},
//! };
//! use slidepay_ui::{Dp, FrameClock};
//!
//! let clock = FrameClock::new();
//! let drags = DragSource::new();
//! let paid = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&paid);
//!
//! let slider = SlideToPay::mount(
//!     SlideToPayArgs::new(move || flag.store(true, Ordering::SeqCst))
//!         .slider_width(Dp(300.0)),
//!     Viewport::new(Dp(390.0), Dp(844.0)),
//!     &clock,
//!     &drags,
//! )
//! .expect("valid configuration");
//!
//! drags.emit(DragEvent::Began);
//! drags.emit(DragEvent::Ended { translation_x: 240.0 });
//! assert!(paid.load(Ordering::SeqCst));
//!
//! clock.advance_by(Duration::from_millis(16));
//! let frame = slider.frame();
//! assert!(frame.label.opacity <= 1.0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod error;
pub mod gesture;
pub mod icons;
pub mod shimmer;
pub mod slide_to_pay;

pub use error::{ConfigError, IconError};
