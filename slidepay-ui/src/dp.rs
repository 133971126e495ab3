//! # Density-Independent Pixels (Dp)
//!
//! All widget geometry is expressed in [`Dp`]. Frames carry dp values; the
//! host multiplies by its own display scale when it draws.
//!
//! ## Usage
//!
//! ```
//! use slidepay_ui::Dp;
//!
//! let thumb = Dp(55.0);
//! let track = Dp(358.0);
//! let travel = track - thumb;
//! assert_eq!(travel, Dp(303.0));
//! ```

use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

/// Density-independent pixels.
///
/// `Dp` wraps an `f64`; conversion to physical pixels belongs to the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero length.
    pub const ZERO: Dp = Dp(0.0);

    /// Returns `true` if the inner value is neither infinite nor NaN.
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Dp(value as f64)
    }
}

impl Add for Dp {
    type Output = Dp;

    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl Sub for Dp {
    type Output = Dp;

    fn sub(self, rhs: Dp) -> Dp {
        Dp(self.0 - rhs.0)
    }
}

impl Mul<f64> for Dp {
    type Output = Dp;

    fn mul(self, rhs: f64) -> Dp {
        Dp(self.0 * rhs)
    }
}

impl fmt::Display for Dp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}dp", self.0)
    }
}
