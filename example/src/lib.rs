//! Headless walkthrough of the slide-to-pay control.
//!
//! Drives a mounted slider with a scripted frame clock and a scripted pan
//! gesture, logging each rendered frame. Run with `RUST_LOG=example=info`.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use slidepay_components::{
    gesture::{DragEvent, DragSource},
    slide_to_pay::{SlidePhase, SlideToPay, SlideToPayArgs, SlideToPayFrame, Viewport},
};
use slidepay_ui::{Dp, FrameClock};
use tracing::{info, info_span};

const FRAME: Duration = Duration::from_millis(16);

/// Payment attempts recorded by the demo's completion handler.
#[derive(Debug, Default, Clone)]
pub struct PaymentLog {
    attempts: Arc<Mutex<Vec<Duration>>>,
}

impl PaymentLog {
    /// Number of completed slides.
    pub fn len(&self) -> usize {
        self.attempts.lock().len()
    }

    /// Whether no slide has completed yet.
    pub fn is_empty(&self) -> bool {
        self.attempts.lock().is_empty()
    }
}

/// Runs the scripted session against a phone-sized viewport.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let clock = FrameClock::new();
    let drags = DragSource::new();
    let payments = PaymentLog::default();

    let slider = mount(&clock, &drags, &payments)?;
    play(&clock, &drags, &slider);

    info!(payments = payments.len(), "session finished");
    Ok(())
}

fn mount(
    clock: &FrameClock,
    drags: &DragSource,
    payments: &PaymentLog,
) -> Result<SlideToPay, Box<dyn std::error::Error>> {
    let attempts = Arc::clone(&payments.attempts);
    let pay_clock = clock.clone();
    let slider = SlideToPay::mount(
        SlideToPayArgs::new(move || {
            let at = pay_clock.now();
            info!(?at, "payment confirmed");
            attempts.lock().push(at);
        }),
        Viewport::new(Dp(390.0), Dp(844.0)),
        clock,
        drags,
    )?;
    Ok(slider)
}

fn play(clock: &FrameClock, drags: &DragSource, slider: &SlideToPay) {
    {
        let _span = info_span!("idle").entered();
        run_frames(clock, slider, Duration::from_millis(1800));
    }

    let max = slider.geometry().max_offset();
    {
        let _span = info_span!("short_slide").entered();
        drag(clock, drags, slider, max * 0.4);
        run_until(clock, slider, |frame| frame.phase == SlidePhase::Idle);
    }
    {
        let _span = info_span!("full_slide").entered();
        drag(clock, drags, slider, max);
        run_until(clock, slider, |frame| frame.phase == SlidePhase::Idle);
    }
}

fn drag(clock: &FrameClock, drags: &DragSource, slider: &SlideToPay, distance: f32) {
    drags.emit(DragEvent::Began);
    for step in 1..=20 {
        drags.emit(DragEvent::Moved {
            translation_x: distance * step as f32 / 20.0,
        });
        run_frames(clock, slider, FRAME);
    }
    drags.emit(DragEvent::Ended {
        translation_x: distance,
    });
}

fn run_frames(clock: &FrameClock, slider: &SlideToPay, duration: Duration) {
    let end = clock.now() + duration;
    while clock.now() < end {
        clock.advance_by(FRAME);
        log_frame(clock.now(), &slider.frame());
    }
}

fn run_until(clock: &FrameClock, slider: &SlideToPay, done: impl Fn(&SlideToPayFrame) -> bool) {
    // Ten seconds of frames.
    for _ in 0..625 {
        clock.advance_by(FRAME);
        let frame = slider.frame();
        log_frame(clock.now(), &frame);
        if done(&frame) {
            return;
        }
    }
}

fn log_frame(now: Duration, frame: &SlideToPayFrame) {
    let shimmer_x = frame.shimmer.band.as_ref().map(|band| band.translation_x.0);
    info!(
        ?now,
        phase = ?frame.phase,
        thumb_x = frame.thumb.x.0,
        scale = frame.thumb.scale,
        icon = ?frame.thumb.icon,
        label_opacity = frame.label.opacity,
        shimmer_x,
        "frame"
    );
}
