//! Threshold bands and pixel classification
//!
//! The double-threshold filter looks at two closed intervals of intensity:
//!
//! - the **candidate band** `[t1, t2]`: pixels that may extend a region
//! - the **seed band** `[t3, t4]`: pixels that anchor a region
//!
//! [`classify_bands`] maps every pixel of an image to one [`Band`]. The scan
//! reads the input only, so it is split into independent chunks and runs on
//! the rayon thread pool when the `parallel` feature is enabled.

use crate::progress::{ProgressObserver, ProgressTicker};
use dthresh_core::{Extent, NdImage, Pixel};

/// Pixels per classification chunk.
const CHUNK_LEN: usize = 1 << 14;

/// Classification of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Band {
    /// In neither band
    Outside = 0,
    /// In the candidate band only
    Candidate = 1,
    /// In the seed band (whether or not also a candidate)
    Seed = 2,
}

impl Band {
    /// Decode the low two bits of a mask byte.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & BAND_BITS {
            2 | 3 => Band::Seed,
            1 => Band::Candidate,
            _ => Band::Outside,
        }
    }
}

/// Bits of a mask byte that carry the [`Band`].
pub(crate) const BAND_BITS: u8 = 0b011;

/// The two closed intensity intervals of a double threshold.
///
/// A band whose lower bound exceeds its upper bound (or that has a NaN
/// bound) is empty: no pixel belongs to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBands<T> {
    /// Lower bound of the candidate band
    pub threshold1: T,
    /// Upper bound of the candidate band
    pub threshold2: T,
    /// Lower bound of the seed band
    pub threshold3: T,
    /// Upper bound of the seed band
    pub threshold4: T,
}

impl<T: Pixel> ThresholdBands<T> {
    /// Create bands `[t1, t2]` (candidates) and `[t3, t4]` (seeds).
    pub fn new(t1: T, t2: T, t3: T, t4: T) -> Self {
        Self {
            threshold1: t1,
            threshold2: t2,
            threshold3: t3,
            threshold4: t4,
        }
    }

    /// The candidate band as `(low, high)`.
    pub fn candidate_band(&self) -> (T, T) {
        (self.threshold1, self.threshold2)
    }

    /// The seed band as `(low, high)`.
    pub fn seed_band(&self) -> (T, T) {
        (self.threshold3, self.threshold4)
    }

    /// True if no value can be a candidate.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn candidate_band_is_empty(&self) -> bool {
        !(self.threshold1 <= self.threshold2)
    }

    /// True if no value can be a seed.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn seed_band_is_empty(&self) -> bool {
        !(self.threshold3 <= self.threshold4)
    }

    /// True if `value` lies in `[t3, t4]`.
    #[inline]
    pub fn is_seed(&self, value: T) -> bool {
        self.threshold3 <= value && value <= self.threshold4
    }

    /// True if `value` lies in `[t1, t2]`.
    #[inline]
    pub fn is_candidate(&self, value: T) -> bool {
        self.threshold1 <= value && value <= self.threshold2
    }

    /// Classify one value. Seed membership wins over candidate membership.
    #[inline]
    pub fn classify(&self, value: T) -> Band {
        if self.is_seed(value) {
            Band::Seed
        } else if self.is_candidate(value) {
            Band::Candidate
        } else {
            Band::Outside
        }
    }
}

/// Per-pixel [`Band`] classification of an image.
#[derive(Debug, Clone)]
pub struct BandMask {
    image: NdImage<u8>,
}

impl BandMask {
    /// Wrap an image of raw band bytes.
    pub(crate) fn from_raw(image: NdImage<u8>) -> Self {
        Self { image }
    }

    /// Get the mask extent.
    pub fn extent(&self) -> &Extent {
        self.image.extent()
    }

    /// Get the band of the pixel at `coords`.
    pub fn band_at(&self, coords: &[usize]) -> Option<Band> {
        self.image.get(coords).map(Band::from_bits)
    }

    /// Count pixels in `band`.
    pub fn count(&self, band: Band) -> usize {
        self.image
            .data()
            .iter()
            .filter(|&&bits| Band::from_bits(bits) == band)
            .count()
    }

    /// View the mask as an image of [`Band`] discriminants.
    pub fn as_image(&self) -> &NdImage<u8> {
        &self.image
    }

    pub(crate) fn into_image(self) -> NdImage<u8> {
        self.image
    }
}

/// Classify every pixel of `image` against `bands`.
///
/// # Examples
///
/// ```
/// use dthresh_core::NdImage;
/// use dthresh_region::{Band, ThresholdBands, classify_bands};
///
/// let image = NdImage::from_rows(4, 1, vec![0u8, 100, 200, 250]).unwrap();
/// let mask = classify_bands(&image, &ThresholdBands::new(100, 220, 230, 255));
/// assert_eq!(mask.band_at(&[1, 0]), Some(Band::Candidate));
/// assert_eq!(mask.band_at(&[3, 0]), Some(Band::Seed));
/// assert_eq!(mask.count(Band::Outside), 1);
/// ```
pub fn classify_bands<T: Pixel>(image: &NdImage<T>, bands: &ThresholdBands<T>) -> BandMask {
    let mut observer = crate::progress::NoProgress;
    let mut ticker = ProgressTicker::new(&mut observer, 0.0, 1.0, image.num_pixels());
    classify_tracked(image, bands, &mut ticker)
}

pub(crate) fn classify_tracked<T: Pixel, P: ProgressObserver + ?Sized>(
    image: &NdImage<T>,
    bands: &ThresholdBands<T>,
    ticker: &mut ProgressTicker<'_, P>,
) -> BandMask {
    let mut mask = image
        .create_template::<u8>()
        .try_into_mut()
        .unwrap_or_else(|p| p.to_mut());
    let src = image.data();
    let dst = mask.data_mut();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        src.par_chunks(CHUNK_LEN)
            .zip(dst.par_chunks_mut(CHUNK_LEN))
            .for_each(|(s, d)| classify_chunk(bands, s, d));
        ticker.advance(src.len());
    }

    #[cfg(not(feature = "parallel"))]
    for (s, d) in src.chunks(CHUNK_LEN).zip(dst.chunks_mut(CHUNK_LEN)) {
        classify_chunk(bands, s, d);
        ticker.advance(s.len());
    }

    BandMask::from_raw(mask.into())
}

#[inline]
fn classify_chunk<T: Pixel>(bands: &ThresholdBands<T>, src: &[T], dst: &mut [u8]) {
    for (&value, out) in src.iter().zip(dst.iter_mut()) {
        *out = bands.classify(value) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        let bands = ThresholdBands::new(10u8, 20, 30, 40);
        assert!(bands.is_candidate(10));
        assert!(bands.is_candidate(20));
        assert!(!bands.is_candidate(21));
        assert!(bands.is_seed(30));
        assert!(bands.is_seed(40));
        assert!(!bands.is_seed(29));
    }

    #[test]
    fn test_seed_wins_over_candidate() {
        // Overlapping bands
        let bands = ThresholdBands::new(0u8, 100, 50, 150);
        assert_eq!(bands.classify(75), Band::Seed);
        assert_eq!(bands.classify(25), Band::Candidate);
        assert_eq!(bands.classify(200), Band::Outside);
    }

    #[test]
    fn test_inverted_band_is_empty() {
        let bands = ThresholdBands::new(50u8, 10, 200, 100);
        assert!(bands.candidate_band_is_empty());
        assert!(bands.seed_band_is_empty());
        for v in 0..=255u8 {
            assert_eq!(bands.classify(v), Band::Outside);
        }
    }

    #[test]
    fn test_nan_in_no_band() {
        let bands = ThresholdBands::new(f32::MIN, 0.0, 0.0, f32::MAX);
        assert_eq!(bands.classify(f32::NAN), Band::Outside);

        let nan_bounds = ThresholdBands::new(f32::NAN, 1.0, 0.0, f32::NAN);
        assert!(nan_bounds.candidate_band_is_empty());
        assert!(nan_bounds.seed_band_is_empty());
    }

    #[test]
    fn test_classify_bands_counts() {
        let extent = Extent::new([40_000]).unwrap();
        let image = NdImage::from_fn(extent, |c| (c[0] % 256) as u8);
        let mask = classify_bands(&image, &ThresholdBands::new(100, 199, 200, 255));
        // 40000 = 156 * 256 + 64; values 0..64 get one extra occurrence
        assert_eq!(mask.count(Band::Candidate), 100 * 156);
        assert_eq!(mask.count(Band::Seed), 56 * 156);
        assert_eq!(mask.count(Band::Outside), 100 * 156 + 64);
    }

    #[test]
    fn test_band_from_bits_ignores_high_bits() {
        assert_eq!(Band::from_bits(0b110), Band::Seed);
        assert_eq!(Band::from_bits(0b101), Band::Candidate);
        assert_eq!(Band::from_bits(0b100), Band::Outside);
    }
}
