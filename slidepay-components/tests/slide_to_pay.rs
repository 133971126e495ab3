use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use slidepay_components::{
    gesture::{DragEvent, DragSource},
    icons::ThumbIcon,
    shimmer::translation_x,
    slide_to_pay::{SlidePhase, SlideToPay, SlideToPayArgs, Viewport},
};
use slidepay_ui::{Dp, FrameClock};

struct Harness {
    clock: FrameClock,
    drags: DragSource,
    completions: Arc<AtomicUsize>,
    slider: SlideToPay,
}

impl Harness {
    fn new(threshold: f64) -> Self {
        let clock = FrameClock::new();
        let drags = DragSource::new();
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        let slider = SlideToPay::mount(
            SlideToPayArgs::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .threshold(threshold)
            .slider_width(Dp(355.0)),
            Viewport::new(Dp(390.0), Dp(844.0)),
            &clock,
            &drags,
        )
        .expect("valid configuration");
        Self {
            clock,
            drags,
            completions,
            slider,
        }
    }

    fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }

    fn run_frames(&self, duration: Duration) {
        let end = self.clock.now() + duration;
        while self.clock.now() < end {
            self.clock.advance_by(Duration::from_millis(16));
        }
    }

    fn slide(&self, fraction_of_max: f32) {
        let target = self.slider.geometry().max_offset() * fraction_of_max;
        self.drags.emit(DragEvent::Began);
        for step in 1..=10 {
            self.drags.emit(DragEvent::Moved {
                translation_x: target * step as f32 / 10.0,
            });
            self.run_frames(Duration::from_millis(16));
        }
        self.drags.emit(DragEvent::Ended {
            translation_x: target,
        });
    }
}

#[test]
fn release_past_threshold_completes_exactly_once() {
    let h = Harness::new(0.7);
    h.slide(0.71);
    assert_eq!(h.completions(), 1);
    assert_eq!(h.slider.phase(), SlidePhase::Settling);

    h.run_frames(Duration::from_secs(4));
    assert_eq!(h.completions(), 1);
    assert_eq!(h.slider.phase(), SlidePhase::Idle);
    assert_eq!(h.slider.drag_offset(), 0.0);
}

#[test]
fn release_short_of_threshold_springs_back_without_completing() {
    let h = Harness::new(0.7);
    h.slide(0.69);
    assert_eq!(h.completions(), 0);
    assert_eq!(h.slider.phase(), SlidePhase::Returning);

    h.run_frames(Duration::from_millis(48));
    let midway = h.slider.drag_offset();
    assert!(midway > 0.0 && midway < h.slider.geometry().max_offset() * 0.69);

    h.run_frames(Duration::from_secs(2));
    assert_eq!(h.slider.drag_offset(), 0.0);
    assert_eq!(h.slider.phase(), SlidePhase::Idle);
    assert_eq!(h.completions(), 0);
}

#[test]
fn release_exactly_at_threshold_does_not_complete() {
    let h = Harness::new(0.7);
    let at = h.slider.geometry().threshold_offset();
    h.drags.emit(DragEvent::Began);
    h.drags.emit(DragEvent::Moved { translation_x: at });
    assert!(!h.slider.visuals().committed);
    h.drags.emit(DragEvent::Ended { translation_x: at });
    assert_eq!(h.completions(), 0);
}

#[test]
fn threshold_close_to_one_completes_at_track_end() {
    let h = Harness::new(0.999_999_99);
    assert_eq!(
        h.slider.geometry().threshold_offset(),
        h.slider.geometry().max_offset()
    );
    h.drags.emit(DragEvent::Began);
    h.drags.emit(DragEvent::Ended {
        translation_x: 10_000.0,
    });
    assert_eq!(h.completions(), 1);
    assert_eq!(h.slider.phase(), SlidePhase::Settling);
}

#[test]
fn completion_fires_before_settle_delay() {
    let h = Harness::new(0.5);
    h.drags.emit(DragEvent::Began);
    h.drags.emit(DragEvent::Ended {
        translation_x: 260.0,
    });
    assert_eq!(h.completions(), 1);

    h.run_frames(Duration::from_millis(900));
    let frame = h.slider.frame();
    assert_eq!(frame.phase, SlidePhase::Settling);
    assert_eq!(frame.thumb.icon, ThumbIcon::Check);
    assert_eq!(h.slider.drag_offset(), 260.0);

    h.run_frames(Duration::from_millis(200));
    assert_eq!(h.slider.phase(), SlidePhase::Returning);
}

#[test]
fn two_successful_slides_complete_twice() {
    let h = Harness::new(0.7);
    h.slide(0.9);
    h.run_frames(Duration::from_secs(3));
    h.slide(0.95);
    assert_eq!(h.completions(), 2);
}

#[test]
fn drag_offset_stays_inside_track() {
    let h = Harness::new(0.7);
    let max = h.slider.geometry().max_offset();
    h.drags.emit(DragEvent::Began);
    for translation_x in [-80.0, -1.0, 0.0, 12.5, max, max + 1.0, max * 3.0] {
        h.drags.emit(DragEvent::Moved { translation_x });
        let offset = h.slider.drag_offset();
        assert!((0.0..=max).contains(&offset), "offset {offset} outside track");
    }
}

#[test]
fn label_fades_out_then_in_while_dragging() {
    let h = Harness::new(0.7);
    let geometry = h.slider.geometry();
    h.drags.emit(DragEvent::Began);

    h.drags.emit(DragEvent::Moved { translation_x: 0.0 });
    assert_eq!(h.slider.frame().label.opacity, 1.0);

    h.drags.emit(DragEvent::Moved {
        translation_x: geometry.threshold_offset(),
    });
    assert_eq!(h.slider.frame().label.opacity, 0.0);
    assert_eq!(h.slider.frame().thumb.icon, ThumbIcon::Arrow);

    h.drags.emit(DragEvent::Moved {
        translation_x: geometry.max_offset(),
    });
    let frame = h.slider.frame();
    assert!((frame.label.opacity - 1.0).abs() < 1e-5);
    assert!(frame.label.opacity <= 1.0);
    assert_eq!(frame.thumb.icon, ThumbIcon::Check);
}

#[test]
fn label_stays_hidden_while_a_full_slide_settles() {
    let h = Harness::new(0.7);
    h.slide(1.0);
    assert_eq!(h.slider.phase(), SlidePhase::Settling);
    assert_eq!(h.slider.frame().label.opacity, 0.0);

    h.run_frames(Duration::from_millis(900));
    let frame = h.slider.frame();
    assert_eq!(frame.thumb.icon, ThumbIcon::Check);
    assert_eq!(frame.label.opacity, 0.0);

    h.run_frames(Duration::from_secs(3));
    assert_eq!(h.slider.phase(), SlidePhase::Idle);
    assert_eq!(h.slider.frame().label.opacity, 1.0);
}

#[test]
fn idle_thumb_nudges_forward() {
    let h = Harness::new(0.7);
    h.run_frames(Duration::from_millis(1200));
    let frame = h.slider.frame();
    assert_eq!(frame.phase, SlidePhase::Idle);
    assert!(frame.thumb.x > Dp(10.0));
    assert!(frame.thumb.x <= Dp(19.0));
}

#[test]
fn shimmer_background_spans_the_track() {
    let h = Harness::new(0.7);
    let band = h.slider.frame().shimmer.band.expect("measured on mount");
    assert_eq!(band.width, Dp(355.0));
    assert_eq!(band.translation_x, translation_x(0.0, Dp(355.0)));
}

#[test]
fn unmount_stops_all_updates() {
    let h = Harness::new(0.7);
    assert_eq!(h.clock.listener_count(), 2);
    assert_eq!(h.drags.subscriber_count(), 1);

    h.slide(0.9);
    assert_eq!(h.completions(), 1);
    let Harness {
        clock,
        drags,
        completions,
        slider,
    } = h;
    // Unmount while the post-commit reset is still pending.
    drop(slider);

    assert_eq!(clock.listener_count(), 0);
    assert_eq!(drags.subscriber_count(), 0);
    clock.advance_by(Duration::from_secs(2));
    drags.emit(DragEvent::Began);
    drags.emit(DragEvent::Ended {
        translation_x: 300.0,
    });
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn completion_panic_reaches_the_host() {
    let clock = FrameClock::new();
    let drags = DragSource::new();
    let slider = SlideToPay::mount(
        SlideToPayArgs::new(|| panic!("payment backend unavailable")),
        Viewport::new(Dp(390.0), Dp(844.0)),
        &clock,
        &drags,
    )
    .expect("valid configuration");

    drags.emit(DragEvent::Began);
    let result = catch_unwind(AssertUnwindSafe(|| {
        drags.emit(DragEvent::Ended {
            translation_x: 320.0,
        });
    }));
    assert!(result.is_err());
    // The widget is still usable after the host handled the panic.
    assert_eq!(slider.phase(), SlidePhase::Settling);
    for _ in 0..70 {
        clock.advance_by(Duration::from_millis(16));
    }
    assert_eq!(slider.phase(), SlidePhase::Returning);
}
