//! Looping gradient sweep used as a decorative background.
//!
//! ## Usage
//!
//! Mount a [`Shimmer`] against the host's frame clock, report its measured
//! width from the layout pass with [`Shimmer::on_layout`], and draw
//! [`Shimmer::frame`] each frame. The band travels from fully off-left to
//! fully off-right, pauses, and repeats.

use std::{sync::Arc, time::Duration};

use derive_setters::Setters;
use parking_lot::Mutex;
use slidepay_ui::{Color, Dp, FrameClock, FrameTime, Subscription};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace, warn};

use crate::{
    ConfigError,
    animation::{AnimationStep, LoopMode, Timeline},
    error::positive_dimension,
};

/// Defaults for [`Shimmer`].
pub struct ShimmerDefaults;

impl ShimmerDefaults {
    /// Green used for the wrapper background and the outer gradient stops.
    pub const GREY: Color = Color::from_rgb_u8(0x15, 0x9f, 0x6c);
    /// Highlight in the middle of the band.
    pub const CREAM: Color = Color::from_rgb_u8(0xf9, 0xf6, 0xee);
    /// Pause before each sweep.
    pub const DELAY: Duration = Duration::from_millis(1200);
    /// Length of one sweep.
    pub const DURATION: Duration = Duration::from_millis(1300);
    /// Gradient start point in unit coordinates.
    pub const GRADIENT_START: [f32; 2] = [0.4, 0.5];
    /// Gradient end point in unit coordinates.
    pub const GRADIENT_END: [f32; 2] = [0.7, 0.8];
}

/// Horizontal offset of the band for `phase` across a region `width` wide.
///
/// Phase 0 parks the band one full width to the left, phase 1 one full width
/// to the right.
pub fn translation_x(phase: f32, width: Dp) -> Dp {
    Dp(-width.0 + 2.0 * width.0 * phase as f64)
}

/// The sweep timeline: wait, run 0 to 1, reset, forever.
pub fn sweep_timeline() -> Timeline {
    Timeline::new([AnimationStep::new(1.0, ShimmerDefaults::DURATION)])
        .with_delay(ShimmerDefaults::DELAY)
        .with_loop(LoopMode::Forever)
        .reset_each_iteration(true)
}

/// Phase clock that several shimmers can share.
///
/// Every shimmer mounted with the same handle shows the same phase, and a
/// restart by any of them restarts all of them.
#[derive(Clone)]
pub struct SharedShimmerTimeline {
    timeline: Arc<Mutex<Timeline>>,
}

impl SharedShimmerTimeline {
    /// A new, stopped sweep clock.
    pub fn new() -> Self {
        Self {
            timeline: Arc::new(Mutex::new(sweep_timeline())),
        }
    }

    /// Restarts the sweep from phase 0 at `now`.
    pub fn restart(&self, now: FrameTime) {
        self.timeline.lock().start(now, 0.0);
    }

    /// Phase at `now`; 0 before the first start.
    pub fn phase(&self, now: FrameTime) -> f32 {
        self.timeline.lock().sample(now)
    }

    /// Whether the sweep has been started.
    pub fn is_running(&self) -> bool {
        self.timeline.lock().is_running()
    }
}

impl Default for SharedShimmerTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SharedShimmerTimeline {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.timeline, &other.timeline)
    }
}

impl std::fmt::Debug for SharedShimmerTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedShimmerTimeline")
            .field("running", &self.is_running())
            .finish()
    }
}

/// Visual overrides for the moving gradient layer.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct GradientStyle {
    /// Gradient start point in unit coordinates of the band.
    pub start: [f32; 2],
    /// Gradient end point in unit coordinates of the band.
    pub end: [f32; 2],
    /// Opacity multiplier of the whole band.
    pub opacity: f32,
}

impl Default for GradientStyle {
    fn default() -> Self {
        Self {
            start: ShimmerDefaults::GRADIENT_START,
            end: ShimmerDefaults::GRADIENT_END,
            opacity: 1.0,
        }
    }
}

/// Size and decoration of the clipping region.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct WrapperStyle {
    /// Region width.
    pub width: Dp,
    /// Region height.
    pub height: Dp,
    /// Corner radius of the clip.
    pub corner_radius: Dp,
    /// Fill behind the band.
    pub background: Color,
}

impl WrapperStyle {
    /// A wrapper of the given size with square corners.
    pub fn new(width: Dp, height: Dp) -> Self {
        Self {
            width,
            height,
            corner_radius: Dp::ZERO,
            background: ShimmerDefaults::GREY,
        }
    }
}

/// Arguments for [`Shimmer::mount`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct ShimmerArgs {
    /// Gradient stops of the band, left to right.
    pub colors: SmallVec<[Color; 3]>,
    /// Band overrides.
    pub gradient_style: GradientStyle,
    /// Clip region; width and height are required.
    #[setters(skip)]
    pub wrapper_style: WrapperStyle,
    /// Shared phase clock. When `None` the shimmer owns its own.
    #[setters(strip_option)]
    pub timeline: Option<SharedShimmerTimeline>,
}

impl ShimmerArgs {
    /// Arguments for a region styled by `wrapper_style`.
    pub fn new(wrapper_style: WrapperStyle) -> Self {
        Self {
            colors: smallvec![
                ShimmerDefaults::GREY,
                ShimmerDefaults::CREAM,
                ShimmerDefaults::GREY
            ],
            gradient_style: GradientStyle::default(),
            wrapper_style,
            timeline: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive_dimension("shimmer width", self.wrapper_style.width)?;
        positive_dimension("shimmer height", self.wrapper_style.height)?;
        if self.colors.len() < 2 {
            return Err(ConfigError::TooFewGradientStops(self.colors.len()));
        }
        Ok(())
    }
}

/// The moving gradient layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerBand {
    /// Horizontal offset of the band's left edge from the wrapper's.
    pub translation_x: Dp,
    /// Band width; equal to the measured wrapper width.
    pub width: Dp,
    /// Gradient stops.
    pub colors: SmallVec<[Color; 3]>,
    /// Gradient start point.
    pub start: [f32; 2],
    /// Gradient end point.
    pub end: [f32; 2],
    /// Opacity multiplier.
    pub opacity: f32,
}

/// What a host draws for one shimmer frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerFrame {
    /// Wrapper width.
    pub width: Dp,
    /// Wrapper height.
    pub height: Dp,
    /// Clip corner radius.
    pub corner_radius: Dp,
    /// Wrapper fill.
    pub background: Color,
    /// The band; `None` until the first layout measurement.
    pub band: Option<ShimmerBand>,
}

struct ShimmerController {
    timeline: SharedShimmerTimeline,
    measured_width: Option<Dp>,
    phase: f32,
}

impl ShimmerController {
    fn on_layout(&mut self, width: Dp, now: FrameTime) -> bool {
        if !width.is_finite() || width.0 < 0.0 {
            warn!(?width, "ignoring invalid shimmer width from layout");
            return false;
        }
        if self.measured_width == Some(width) {
            return false;
        }
        debug!(?width, previous = ?self.measured_width, "shimmer width changed, restarting sweep");
        self.measured_width = Some(width);
        self.timeline.restart(now);
        self.phase = self.timeline.phase(now);
        true
    }

    fn tick(&mut self, now: FrameTime) {
        self.phase = self.timeline.phase(now);
        trace!(phase = self.phase, "shimmer frame");
    }

    fn frame(&self, args: &ShimmerArgs) -> ShimmerFrame {
        let wrapper = &args.wrapper_style;
        let band = self.measured_width.map(|width| ShimmerBand {
            translation_x: translation_x(self.phase, width),
            width,
            colors: args.colors.clone(),
            start: args.gradient_style.start,
            end: args.gradient_style.end,
            opacity: args.gradient_style.opacity,
        });
        ShimmerFrame {
            width: wrapper.width,
            height: wrapper.height,
            corner_radius: wrapper.corner_radius,
            background: wrapper.background,
            band,
        }
    }
}

/// A mounted shimmer.
///
/// Dropping it unregisters its frame callback.
pub struct Shimmer {
    args: ShimmerArgs,
    clock: FrameClock,
    controller: Arc<Mutex<ShimmerController>>,
    _ticker: Subscription,
}

impl Shimmer {
    /// Validates `args` and starts receiving frames from `clock`.
    ///
    /// The sweep starts with the first [`on_layout`](Self::on_layout).
    pub fn mount(args: ShimmerArgs, clock: &FrameClock) -> Result<Self, ConfigError> {
        args.validate()?;
        let controller = Arc::new(Mutex::new(ShimmerController {
            timeline: args.timeline.clone().unwrap_or_default(),
            measured_width: None,
            phase: 0.0,
        }));
        let weak = Arc::downgrade(&controller);
        let ticker = clock.on_frame(move |now| {
            if let Some(controller) = weak.upgrade() {
                controller.lock().tick(now);
            }
        });
        Ok(Self {
            args,
            clock: clock.clone(),
            controller,
            _ticker: ticker,
        })
    }

    /// Reports the measured width from the layout pass.
    ///
    /// Restarts the sweep when the width differs from the previous report.
    /// Non-finite and negative widths are ignored. Returns whether a restart
    /// happened.
    pub fn on_layout(&self, width: Dp) -> bool {
        let now = self.clock.now();
        self.controller.lock().on_layout(width, now)
    }

    /// Current phase in `[0, 1]`.
    pub fn phase(&self) -> f32 {
        self.controller.lock().phase
    }

    /// Last measured width.
    pub fn measured_width(&self) -> Option<Dp> {
        self.controller.lock().measured_width
    }

    /// The render model for the current frame.
    pub fn frame(&self) -> ShimmerFrame {
        self.controller.lock().frame(&self.args)
    }

}
