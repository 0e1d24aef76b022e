//! Linear intensity rescaling
//!
//! Maps the value range of an image onto a requested output range. This is
//! the display step applied to label images before they are written out
//! (e.g. to spread two label values over `0..=255`).

use super::NdImage;
use crate::pixel::Pixel;

/// Scale and shift of a linear intensity map `out = in * scale + shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    pub scale: f64,
    pub shift: f64,
}

impl LinearMap {
    /// Compute the map sending `[in_min, in_max]` onto `[out_min, out_max]`.
    ///
    /// A degenerate input range (`in_min == in_max`) has zero scale, so a
    /// constant image maps to `out_min`.
    pub fn from_ranges(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Self {
        let scale = if in_min != in_max {
            (out_max - out_min) / (in_max - in_min)
        } else {
            0.0
        };
        Self {
            scale,
            shift: out_min - in_min * scale,
        }
    }

    /// Apply the map to a single value.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.shift
    }
}

impl<T: Pixel> NdImage<T> {
    /// Linearly rescale intensities so the image range spans
    /// `[out_min, out_max]`.
    ///
    /// Output values are rounded (for integral `U`) and clamped to `U`'s
    /// bounds. NaN input pixels map to zero. An empty image rescales to an
    /// empty image.
    ///
    /// # Examples
    ///
    /// ```
    /// use dthresh_core::{Extent, NdImage};
    ///
    /// let labels = NdImage::from_vec(Extent::new([3]).unwrap(), vec![0u8, 1, 1]).unwrap();
    /// let display: NdImage<u8> = labels.rescale_intensity(0, 255);
    /// assert_eq!(display.data(), &[0, 255, 255]);
    /// ```
    pub fn rescale_intensity<U: Pixel>(&self, out_min: U, out_max: U) -> NdImage<U> {
        let Some((lo, hi)) = self.min_max() else {
            return self.create_template();
        };
        let map = LinearMap::from_ranges(
            lo.as_f64(),
            hi.as_f64(),
            out_min.as_f64(),
            out_max.as_f64(),
        );
        self.map(|v| U::from_f64_clamped(map.apply(v.as_f64())))
    }
}
