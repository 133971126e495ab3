//! Declarative animation building blocks.
//!
//! A [`Timeline`] replays a list of [`AnimationStep`]s against the frame
//! clock; a [`Spring`] chases a target with damped harmonic motion. Both are
//! sampled by their owning widget from its frame callback.

use std::time::Duration;

use slidepay_ui::FrameTime;
use smallvec::SmallVec;

/// Progress mapping applied to each timed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// One segment of a timeline: move to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    /// Value reached at the end of the step.
    pub target: f32,
    /// Step length.
    pub duration: Duration,
    /// Progress mapping.
    pub easing: Easing,
}

impl AnimationStep {
    /// A step using the default ease-in-out curve.
    pub const fn new(target: f32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            easing: Easing::EaseInOut,
        }
    }

    /// Replaces the easing curve.
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// How a timeline behaves after its last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Hold the last target and stop.
    #[default]
    Once,
    /// Start over indefinitely.
    Forever,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TimelineRun {
    started_at: FrameTime,
    origin: f32,
}

/// A replayable sequence of animation steps.
///
/// Each iteration waits for `delay`, then runs the steps in order, each one
/// interpolating from where the previous one ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    steps: SmallVec<[AnimationStep; 3]>,
    delay: Duration,
    loop_mode: LoopMode,
    reset_each_iteration: bool,
    run: Option<TimelineRun>,
    value: f32,
}

impl Timeline {
    /// Creates a stopped timeline from `steps`.
    pub fn new(steps: impl IntoIterator<Item = AnimationStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            delay: Duration::ZERO,
            loop_mode: LoopMode::Once,
            reset_each_iteration: false,
            run: None,
            value: 0.0,
        }
    }

    /// Waits `delay` before every iteration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the loop mode.
    pub fn with_loop(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    /// Restarts every iteration from the starting value instead of from the
    /// previous iteration's end value.
    pub fn reset_each_iteration(mut self, reset: bool) -> Self {
        self.reset_each_iteration = reset;
        self
    }

    /// Starts (or restarts) playback at `now` from `from`.
    pub fn start(&mut self, now: FrameTime, from: f32) {
        self.value = from;
        self.run = Some(TimelineRun {
            started_at: now,
            origin: from,
        });
    }

    /// Stops playback, holding the last sampled value.
    pub fn stop(&mut self) {
        self.run = None;
    }

    /// Whether the timeline is still producing values.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Length of one iteration including its delay.
    pub fn cycle_duration(&self) -> Duration {
        self.delay + self.steps.iter().map(|step| step.duration).sum::<Duration>()
    }

    /// Samples the timeline at `now` and returns the value.
    pub fn sample(&mut self, now: FrameTime) -> f32 {
        let Some(run) = self.run else {
            return self.value;
        };
        let last_target = self.steps.last().map_or(run.origin, |step| step.target);
        let cycle = self.cycle_duration().as_nanos();
        if cycle == 0 {
            self.value = last_target;
            self.run = None;
            return self.value;
        }

        let elapsed = now.saturating_sub(run.started_at).as_nanos();
        let iteration = elapsed / cycle;
        if self.loop_mode == LoopMode::Once && iteration >= 1 {
            self.value = last_target;
            self.run = None;
            return self.value;
        }

        let local = Duration::from_nanos((elapsed % cycle) as u64);
        let iteration_start = if iteration == 0 || self.reset_each_iteration {
            run.origin
        } else {
            last_target
        };
        self.value = self.value_within_iteration(local, iteration_start);
        self.value
    }

    fn value_within_iteration(&self, local: Duration, start: f32) -> f32 {
        let Some(mut cursor) = local.checked_sub(self.delay) else {
            return start;
        };
        let mut from = start;
        for step in &self.steps {
            if cursor < step.duration {
                let progress = cursor.as_secs_f32() / step.duration.as_secs_f32();
                return from + (step.target - from) * step.easing.apply(progress);
            }
            cursor -= step.duration;
            from = step.target;
        }
        from
    }
}

/// Physical parameters of a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpringSpec {
    stiffness: f32,
    damping: f32,
    mass: f32,
    /// Distance from target below which the spring may rest.
    rest_displacement: f32,
    /// Speed below which the spring may rest.
    rest_speed: f32,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }
}

const MAX_SPRING_SUBSTEP: Duration = Duration::from_millis(1);

/// A damped spring chasing a target value.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    spec: SpringSpec,
    value: f32,
    velocity: f32,
    target: f32,
    bounds: Option<(f32, f32)>,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            spec: SpringSpec::default(),
            value,
            velocity: 0.0,
            target: value,
            bounds: None,
            at_rest: true,
        }
    }

    /// Keeps the value inside `[lo, hi]`.
    ///
    /// Hitting a bound kills the velocity instead of overshooting past it.
    pub fn with_bounds(mut self, lo: f32, hi: f32) -> Self {
        self.bounds = Some((lo, hi));
        self.value = self.value.clamp(lo, hi);
        self.target = self.target.clamp(lo, hi);
        self
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether the spring has settled on its target.
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Starts moving towards `target` from the current value and velocity.
    pub fn animate_to(&mut self, target: f32) {
        self.target = self.clamp(target);
        self.at_rest = self.settled();
    }

    /// Jumps to `value` and stops.
    pub fn snap_to(&mut self, value: f32) {
        let value = self.clamp(value);
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Integrates `dt` of motion. Returns `true` while still moving.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return false;
        }
        let mut remaining = dt;
        while !remaining.is_zero() {
            let h = remaining.min(MAX_SPRING_SUBSTEP);
            remaining -= h;
            self.integrate(h.as_secs_f32());
            if self.settled() {
                self.value = self.target;
                self.velocity = 0.0;
                self.at_rest = true;
                return false;
            }
        }
        true
    }

    fn integrate(&mut self, h: f32) {
        let displacement = self.value - self.target;
        let force = -self.spec.stiffness * displacement - self.spec.damping * self.velocity;
        self.velocity += force / self.spec.mass * h;
        self.value += self.velocity * h;
        if let Some((lo, hi)) = self.bounds
            && (self.value < lo || self.value > hi)
        {
            self.value = self.value.clamp(lo, hi);
            self.velocity = 0.0;
        }
    }

    fn settled(&self) -> bool {
        (self.target - self.value).abs() < self.spec.rest_displacement
            && self.velocity.abs() < self.spec.rest_speed
    }

    fn clamp(&self, value: f32) -> f32 {
        match self.bounds {
            Some((lo, hi)) => value.clamp(lo, hi),
            None => value,
        }
    }
}
