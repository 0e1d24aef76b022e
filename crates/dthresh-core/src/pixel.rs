//! Scalar pixel types
//!
//! Every image in dthresh stores one scalar per pixel. [`Pixel`] is the
//! bound shared by input intensities, thresholds and output labels.

use num_traits::{Bounded, NumCast, ToPrimitive, Zero};
use std::fmt::Debug;

/// A scalar pixel value.
///
/// Implemented for the unsigned and signed integer types up to 32 bits and
/// for `f32` / `f64`.
pub trait Pixel:
    Copy + PartialOrd + Default + Debug + Send + Sync + Bounded + NumCast + Zero + 'static
{
    /// Whether values of this type are integral (rounded on conversion).
    const INTEGRAL: bool;

    /// Widen to `f64`.
    #[inline]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }

    /// Convert from `f64`, rounding integral types and saturating at the
    /// type's bounds. NaN maps to zero.
    fn from_f64_clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::zero();
        }
        let lo = Self::min_value().as_f64();
        let hi = Self::max_value().as_f64();
        let v = if Self::INTEGRAL { value.round() } else { value };
        NumCast::from(v.clamp(lo, hi)).unwrap_or_else(Self::zero)
    }

    /// Convert from an integer, saturating at the type's bounds.
    fn from_i64_clamped(value: i64) -> Self {
        Self::from_f64_clamped(value as f64)
    }

    /// True for float NaN values.
    #[inline]
    fn is_nan(self) -> bool {
        // NaN is the only value not equal to itself
        self.partial_cmp(&self).is_none()
    }
}

macro_rules! impl_pixel {
    ($($t:ty => $integral:expr),* $(,)?) => {
        $(
            impl Pixel for $t {
                const INTEGRAL: bool = $integral;
            }
        )*
    };
}

impl_pixel! {
    u8 => true,
    u16 => true,
    u32 => true,
    i8 => true,
    i16 => true,
    i32 => true,
    f32 => false,
    f64 => false,
}
