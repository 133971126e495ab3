use slidepay_ui::FrameTime;
use tracing::{debug, trace, warn};

use crate::{
    animation::{Spring, Timeline},
    gesture::DragEvent,
};

use super::{
    BounceCadence, SlideGeometry, SlidePhase, SlideToPayDefaults, SlideVisuals, derive_visuals,
};

/// Result of feeding one gesture event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GestureOutcome {
    /// The event did not change anything.
    Ignored,
    /// State changed.
    Updated,
    /// The release crossed the threshold; the caller must fire the callback.
    Committed,
}

/// Gesture state machine and animation state of one mounted slider.
pub(super) struct SlideController {
    geometry: SlideGeometry,
    phase: SlidePhase,
    offset: Spring,
    scale: Spring,
    bounce: Timeline,
    bounce_offset: f32,
    settle_deadline: Option<FrameTime>,
    ignoring_gesture: bool,
    last_frame: FrameTime,
    visuals: SlideVisuals,
}

impl SlideController {
    pub(super) fn new(geometry: SlideGeometry, now: FrameTime) -> Self {
        let mut bounce = BounceCadence::Initial.timeline();
        bounce.start(now, 0.0);
        Self {
            geometry,
            phase: SlidePhase::Idle,
            offset: Spring::new(0.0).with_bounds(0.0, geometry.max_offset()),
            scale: Spring::new(1.0),
            bounce,
            bounce_offset: 0.0,
            settle_deadline: None,
            ignoring_gesture: false,
            last_frame: now,
            visuals: derive_visuals(0.0, &geometry, false),
        }
    }

    pub(super) fn phase(&self) -> SlidePhase {
        self.phase
    }

    pub(super) fn visuals(&self) -> SlideVisuals {
        self.visuals
    }

    pub(super) fn bounce_offset(&self) -> f32 {
        self.bounce_offset
    }

    pub(super) fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub(super) fn handle(&mut self, event: DragEvent, now: FrameTime) -> GestureOutcome {
        match event {
            DragEvent::Began => self.begin(now),
            DragEvent::Moved { translation_x } => self.drag_to(translation_x, now),
            DragEvent::Ended { translation_x } => self.release(Some(translation_x), now),
            DragEvent::Cancelled => self.release(None, now),
        }
    }

    fn begin(&mut self, now: FrameTime) -> GestureOutcome {
        if self.phase == SlidePhase::Settling {
            warn!("gesture ignored while a committed slide settles");
            self.ignoring_gesture = true;
            return GestureOutcome::Ignored;
        }
        self.ignoring_gesture = false;
        self.bounce_offset = self.bounce.sample(now);
        self.bounce.stop();
        self.offset.snap_to(self.offset.value());
        self.phase = SlidePhase::Dragging;
        self.refresh_visuals();
        self.scale.animate_to(self.visuals.target_scale);
        debug!(bounce = self.bounce_offset, "drag began");
        GestureOutcome::Updated
    }

    fn drag_to(&mut self, translation_x: f32, now: FrameTime) -> GestureOutcome {
        if self.ignoring_gesture {
            return GestureOutcome::Ignored;
        }
        if self.phase != SlidePhase::Dragging && self.begin(now) == GestureOutcome::Ignored {
            return GestureOutcome::Ignored;
        }
        self.offset.snap_to(self.geometry.clamp_offset(translation_x));
        self.refresh_visuals();
        self.scale.animate_to(self.visuals.target_scale);
        trace!(
            translation_x,
            offset = self.visuals.offset,
            committed = self.visuals.committed,
            "drag moved"
        );
        GestureOutcome::Updated
    }

    fn release(&mut self, translation_x: Option<f32>, now: FrameTime) -> GestureOutcome {
        if self.ignoring_gesture {
            self.ignoring_gesture = false;
            return GestureOutcome::Ignored;
        }
        if self.phase != SlidePhase::Dragging {
            return GestureOutcome::Ignored;
        }
        if let Some(translation_x) = translation_x {
            self.offset.snap_to(self.geometry.clamp_offset(translation_x));
        }
        self.scale.animate_to(1.0);

        if self.geometry.is_past_threshold(self.offset.value()) {
            self.phase = SlidePhase::Settling;
            self.settle_deadline = Some(now + SlideToPayDefaults::SETTLE_DELAY);
            self.refresh_visuals();
            debug!(offset = self.offset.value(), "drag released past threshold");
            GestureOutcome::Committed
        } else {
            debug!(offset = self.offset.value(), "drag released short of threshold");
            self.start_return(now);
            GestureOutcome::Updated
        }
    }

    fn start_return(&mut self, now: FrameTime) {
        self.settle_deadline = None;
        self.bounce_offset = 0.0;
        self.bounce = BounceCadence::Alternate.timeline();
        self.bounce.start(now, 0.0);
        self.offset.animate_to(0.0);
        self.phase = SlidePhase::Returning;
        self.refresh_visuals();
    }

    pub(super) fn tick(&mut self, now: FrameTime) {
        let mut dt = now.saturating_sub(self.last_frame);
        self.last_frame = now;

        if self.phase == SlidePhase::Settling
            && let Some(deadline) = self.settle_deadline
            && now >= deadline
        {
            debug!("settle delay elapsed, returning thumb");
            self.start_return(deadline);
            dt = now.saturating_sub(deadline);
        }

        self.offset.step(dt);
        self.scale.step(dt);
        if self.bounce.is_running() {
            self.bounce_offset = self.bounce.sample(now);
        }
        if self.phase == SlidePhase::Returning && self.offset.is_at_rest() {
            debug!("thumb back at rest");
            self.phase = SlidePhase::Idle;
        }
        self.refresh_visuals();
        trace!(
            offset = self.visuals.offset,
            bounce = self.bounce_offset,
            scale = self.scale.value(),
            "slide frame"
        );
    }

    fn refresh_visuals(&mut self) {
        let mut visuals = derive_visuals(
            self.offset.value(),
            &self.geometry,
            self.phase == SlidePhase::Dragging,
        );
        // After a commit the label stays hidden until the returning thumb
        // drops back below the threshold, where the drag curve is also 0.
        let holding = match self.phase {
            SlidePhase::Settling => true,
            SlidePhase::Returning => visuals.committed,
            SlidePhase::Idle | SlidePhase::Dragging => false,
        };
        if holding {
            visuals.label_opacity = 0.0;
        }
        self.visuals = visuals;
    }
}
