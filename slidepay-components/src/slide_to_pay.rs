//! A "slide to confirm payment" control.
//!
//! ## Usage
//!
//! Mount with [`SlideToPay::mount`], forward the thumb's pan events through a
//! [`DragSource`], advance the [`FrameClock`] every display frame and draw
//! [`SlideToPay::frame`]. The completion callback fires synchronously inside
//! the `emit` call that delivers the releasing event, once per successful
//! slide.
//!
//! While idle the thumb nudges right and back to hint at the gesture. Sliding
//! past `threshold × (track width − thumb width)` swaps the arrow for a check
//! mark; releasing there commits, holds for a moment, then springs home.
//! Releasing short of it springs home straight away.

mod bounce;
mod interaction;
mod visuals;

use std::{sync::Arc, time::Duration};

use derive_setters::Setters;
use parking_lot::Mutex;
use slidepay_ui::{Callback, Color, Dp, FrameClock, Subscription};
use tracing::{debug_span, info};

use crate::{
    ConfigError,
    error::positive_dimension,
    gesture::DragSource,
    icons::ThumbIcon,
    shimmer::{Shimmer, ShimmerArgs, ShimmerFrame, WrapperStyle},
};

pub use bounce::BounceCadence;
pub use visuals::{SlideVisuals, derive_visuals, label_opacity};

use interaction::{GestureOutcome, SlideController};

/// Defaults for [`SlideToPay`].
pub struct SlideToPayDefaults;

impl SlideToPayDefaults {
    /// Label shown on the track.
    pub const TEXT: &'static str = "Slide to Pay | ₹220";
    /// Fraction of the usable travel needed to commit.
    pub const THRESHOLD: f64 = 0.7;
    /// Track height.
    pub const HEIGHT: Dp = Dp(70.0);
    /// Track width as a fraction of the viewport width.
    pub const VIEWPORT_WIDTH_FRACTION: f64 = 0.91;
    /// Thumb width and height.
    pub const THUMB_WIDTH: Dp = Dp(55.0);
    /// Inset of the thumb from the track's leading edge.
    pub const THUMB_MARGIN: Dp = Dp(10.0);
    /// Track corner radius.
    pub const CORNER_RADIUS: Dp = Dp(40.0);
    /// Thumb corner radius.
    pub const THUMB_CORNER_RADIUS: Dp = Dp(30.0);
    /// Icon size relative to the thumb.
    pub const ICON_FRACTION: f64 = 0.7;
    /// Track fill.
    pub const TRACK_COLOR: Color = Color::from_rgb_u8(0x15, 0x9f, 0x6c);
    /// Thumb fill.
    pub const THUMB_COLOR: Color = Color::WHITE;
    /// Label color.
    pub const LABEL_COLOR: Color = Color::WHITE;
    /// Label font size.
    pub const LABEL_FONT_SIZE: f32 = 18.0;
    /// Thumb scale while pressed short of the threshold.
    pub const PRESSED_SCALE: f32 = 0.95;
    /// How long a committed slide holds before springing home.
    pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);
}

/// Size of the host's window, used for the default track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window width.
    pub width: Dp,
    /// Window height.
    pub height: Dp,
}

impl Viewport {
    /// A viewport of the given size.
    pub const fn new(width: Dp, height: Dp) -> Self {
        Self { width, height }
    }
}

/// Arguments for [`SlideToPay::mount`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct SlideToPayArgs {
    /// Label shown under the thumb's path.
    #[setters(into)]
    pub text: String,
    /// Fraction of the usable travel required to commit, in (0, 1).
    pub threshold: f64,
    /// Track width; defaults to 91% of the viewport width.
    #[setters(strip_option)]
    pub slider_width: Option<Dp>,
    /// Track height.
    pub slider_height: Dp,
    /// Invoked once per successful slide, at release time.
    #[setters(skip)]
    pub on_complete: Callback,
}

impl SlideToPayArgs {
    /// Default arguments with the given completion handler.
    pub fn new<F>(on_complete: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::with_callback(Callback::new(on_complete))
    }

    /// Default arguments with a shared completion handle.
    pub fn with_callback(on_complete: impl Into<Callback>) -> Self {
        Self {
            text: SlideToPayDefaults::TEXT.to_string(),
            threshold: SlideToPayDefaults::THRESHOLD,
            slider_width: None,
            slider_height: SlideToPayDefaults::HEIGHT,
            on_complete: on_complete.into(),
        }
    }
}

/// Resolved, validated track geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideGeometry {
    /// Track width.
    pub width: Dp,
    /// Track height.
    pub height: Dp,
    /// Thumb width.
    pub thumb_width: Dp,
    /// Commit fraction in (0, 1).
    pub threshold: f64,
}

impl SlideGeometry {
    /// Validates `args` against `viewport`.
    pub fn resolve(args: &SlideToPayArgs, viewport: Viewport) -> Result<Self, ConfigError> {
        if !(args.threshold.is_finite() && args.threshold > 0.0 && args.threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(args.threshold));
        }
        let width = match args.slider_width {
            Some(width) => positive_dimension("slider width", width)?,
            None => {
                positive_dimension("viewport width", viewport.width)?
                    * SlideToPayDefaults::VIEWPORT_WIDTH_FRACTION
            }
        };
        let height = positive_dimension("slider height", args.slider_height)?;
        let thumb = SlideToPayDefaults::THUMB_WIDTH;
        if width <= thumb {
            return Err(ConfigError::TrackTooNarrow { width, thumb });
        }
        Ok(Self {
            width,
            height,
            thumb_width: thumb,
            threshold: args.threshold,
        })
    }

    /// Furthest the thumb can travel.
    pub fn max_offset(&self) -> f32 {
        self.travel() as f32
    }

    /// Travel beyond which a release commits, rounded for display.
    ///
    /// Commit decisions use [`SlideGeometry::is_past_threshold`], which
    /// compares at full precision.
    pub fn threshold_offset(&self) -> f32 {
        self.exact_threshold_offset() as f32
    }

    /// Whether a thumb at `offset` is strictly past the commit threshold.
    pub fn is_past_threshold(&self, offset: f32) -> bool {
        f64::from(offset) > self.exact_threshold_offset()
    }

    fn travel(&self) -> f64 {
        (self.width - self.thumb_width).0
    }

    fn exact_threshold_offset(&self) -> f64 {
        self.threshold * self.travel()
    }

    /// Clamps a raw gesture translation into `[0, max_offset]`.
    pub fn clamp_offset(&self, translation_x: f32) -> f32 {
        if translation_x.is_nan() {
            return 0.0;
        }
        translation_x.clamp(0.0, self.max_offset())
    }
}

/// Where the control is in its gesture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlidePhase {
    /// Waiting for a gesture; the thumb nudges on a loop.
    #[default]
    Idle,
    /// A finger is on the thumb.
    Dragging,
    /// Committed; holding with the check mark before resetting.
    Settling,
    /// Springing back to the start.
    Returning,
}

/// Track layer of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFrame {
    /// Track width.
    pub width: Dp,
    /// Track height.
    pub height: Dp,
    /// Track fill.
    pub color: Color,
    /// Corner radius.
    pub corner_radius: Dp,
}

/// Label layer of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFrame {
    /// Text to draw centered on the track.
    pub text: String,
    /// Text color before opacity.
    pub color: Color,
    /// Font size.
    pub font_size: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Thumb layer of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbFrame {
    /// Left edge relative to the track, including the idle nudge.
    pub x: Dp,
    /// Top edge relative to the track.
    pub y: Dp,
    /// Width and height before scaling.
    pub size: Dp,
    /// Corner radius.
    pub corner_radius: Dp,
    /// Fill.
    pub color: Color,
    /// Scale about the thumb center.
    pub scale: f32,
    /// Glyph to draw.
    pub icon: ThumbIcon,
    /// Glyph size.
    pub icon_size: Dp,
}

/// Everything a host draws for one frame, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideToPayFrame {
    /// Gesture phase at the time of the frame.
    pub phase: SlidePhase,
    /// Track fill.
    pub track: TrackFrame,
    /// Shimmer background clipped to the track.
    pub shimmer: ShimmerFrame,
    /// Label.
    pub label: LabelFrame,
    /// Thumb.
    pub thumb: ThumbFrame,
}

/// A mounted slide-to-pay control.
///
/// Dropping it cancels its frame callback, its gesture subscription, its
/// shimmer and any pending reset after a commit.
pub struct SlideToPay {
    text: String,
    geometry: SlideGeometry,
    controller: Arc<Mutex<SlideController>>,
    shimmer: Shimmer,
    _ticker: Subscription,
    _drag: Subscription,
}

impl SlideToPay {
    /// Validates `args`, subscribes to `drags` and starts the idle nudge.
    pub fn mount(
        args: SlideToPayArgs,
        viewport: Viewport,
        clock: &FrameClock,
        drags: &DragSource,
    ) -> Result<Self, ConfigError> {
        let geometry = SlideGeometry::resolve(&args, viewport)?;
        let _span = debug_span!(
            "slide_to_pay_mount",
            width = geometry.width.0,
            threshold = geometry.threshold
        )
        .entered();
        ThumbIcon::Arrow.load()?;
        ThumbIcon::Check.load()?;

        let shimmer = Shimmer::mount(
            ShimmerArgs::new(
                WrapperStyle::new(geometry.width, geometry.height)
                    .corner_radius(SlideToPayDefaults::CORNER_RADIUS),
            ),
            clock,
        )?;
        shimmer.on_layout(geometry.width);

        let controller = Arc::new(Mutex::new(SlideController::new(geometry, clock.now())));

        let weak = Arc::downgrade(&controller);
        let ticker = clock.on_frame(move |now| {
            if let Some(controller) = weak.upgrade() {
                controller.lock().tick(now);
            }
        });

        let weak = Arc::downgrade(&controller);
        let drag_clock = clock.clone();
        let on_complete = args.on_complete.clone();
        let drag = drags.subscribe(move |event| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let outcome = controller.lock().handle(*event, drag_clock.now());
            if outcome == GestureOutcome::Committed {
                info!("slide committed, invoking completion callback");
                on_complete.call();
            }
        });

        Ok(Self {
            text: args.text,
            geometry,
            controller,
            shimmer,
            _ticker: ticker,
            _drag: drag,
        })
    }

    /// The render model for the current frame.
    pub fn frame(&self) -> SlideToPayFrame {
        let geometry = self.geometry;
        let controller = self.controller.lock();
        let visuals = controller.visuals();
        let size = geometry.thumb_width;
        SlideToPayFrame {
            phase: controller.phase(),
            track: TrackFrame {
                width: geometry.width,
                height: geometry.height,
                color: SlideToPayDefaults::TRACK_COLOR,
                corner_radius: SlideToPayDefaults::CORNER_RADIUS,
            },
            shimmer: self.shimmer.frame(),
            label: LabelFrame {
                text: self.text.clone(),
                color: SlideToPayDefaults::LABEL_COLOR,
                font_size: SlideToPayDefaults::LABEL_FONT_SIZE,
                opacity: visuals.label_opacity,
            },
            thumb: ThumbFrame {
                x: SlideToPayDefaults::THUMB_MARGIN
                    + Dp::from(visuals.offset)
                    + Dp::from(controller.bounce_offset()),
                y: Dp((geometry.height.0 - size.0) / 2.0),
                size,
                corner_radius: SlideToPayDefaults::THUMB_CORNER_RADIUS,
                color: SlideToPayDefaults::THUMB_COLOR,
                scale: controller.scale(),
                icon: visuals.icon,
                icon_size: size * SlideToPayDefaults::ICON_FRACTION,
            },
        }
    }

    /// Current gesture phase.
    pub fn phase(&self) -> SlidePhase {
        self.controller.lock().phase()
    }

    /// Clamped thumb travel, excluding the idle nudge.
    pub fn drag_offset(&self) -> f32 {
        self.controller.lock().visuals().offset
    }

    /// Idle nudge superimposed on the drag offset.
    pub fn bounce_offset(&self) -> f32 {
        self.controller.lock().bounce_offset()
    }

    /// Current thumb scale.
    pub fn thumb_scale(&self) -> f32 {
        self.controller.lock().scale()
    }

    /// Values derived from the current drag offset.
    pub fn visuals(&self) -> SlideVisuals {
        self.controller.lock().visuals()
    }

    /// Resolved track geometry.
    pub fn geometry(&self) -> SlideGeometry {
        self.geometry
    }
}
