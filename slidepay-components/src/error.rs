//! Configuration and asset errors.

use slidepay_ui::Dp;
use thiserror::Error;

/// Rejected widget configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Threshold outside the open interval (0, 1).
    #[error("threshold must lie strictly between 0 and 1, got {0}")]
    InvalidThreshold(f64),
    /// The track leaves no room for the thumb to travel.
    #[error("slider width {width} must be larger than the thumb width {thumb}")]
    TrackTooNarrow {
        /// Resolved track width.
        width: Dp,
        /// Fixed thumb width.
        thumb: Dp,
    },
    /// A width or height that is not a positive finite length.
    #[error("{name} must be a positive finite length, got {value}")]
    InvalidDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The offending value.
        value: Dp,
    },
    /// A gradient needs at least two color stops.
    #[error("shimmer gradient needs at least 2 color stops, got {0}")]
    TooFewGradientStops(usize),
    /// A bundled icon could not be loaded.
    #[error(transparent)]
    Icon(#[from] IconError),
}

/// Failure to load a bundled icon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconError {
    /// The SVG asset did not parse.
    #[error("failed to parse icon `{name}`: {message}")]
    Parse {
        /// Asset file name.
        name: &'static str,
        /// Parser message.
        message: String,
    },
}

pub(crate) fn positive_dimension(name: &'static str, value: Dp) -> Result<Dp, ConfigError> {
    if value.is_finite() && value.0 > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}
