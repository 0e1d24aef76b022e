//! Double-threshold segmentation
//!
//! Labels a pixel *inside* when it belongs to a connected component of
//! candidate-or-seed pixels that contains at least one seed:
//!
//! 1. every pixel is classified against the seed band `[t3, t4]` and the
//!    candidate band `[t1, t2]` ([`crate::classify_bands`])
//! 2. regions are grown from every seed through seed and candidate pixels
//!    ([`crate::grow_seeded_regions`])
//!
//! The result is the union of all seeded components and does not depend on
//! traversal order. A band whose lower threshold exceeds its upper threshold
//! is empty; this is not an error.

use crate::bands::{ThresholdBands, classify_tracked};
use crate::connectivity::Connectivity;
use crate::error::RegionResult;
use crate::progress::{NoProgress, ProgressObserver, ProgressTicker};
use crate::seedfill::{GrowthStats, grow_tracked};
use dthresh_core::{NdImage, Pixel};
use std::time::Instant;

/// Parameters of a double-threshold segmentation.
///
/// # Examples
///
/// ```
/// use dthresh_region::{Connectivity, DoubleThresholdParams};
///
/// let params: DoubleThresholdParams<u8> = DoubleThresholdParams::new(100, 220, 230, 255)
///     .with_inside_value(1)
///     .with_connectivity(Connectivity::Full);
/// assert_eq!(params.outside_value, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleThresholdParams<T, L = u8> {
    /// Candidate band `[t1, t2]` and seed band `[t3, t4]`
    pub bands: ThresholdBands<T>,
    /// Label of pixels in seeded components (default: `L::max_value()`)
    pub inside_value: L,
    /// Label of all other pixels (default: zero)
    pub outside_value: L,
    /// Neighborhood used for growth (default: face)
    pub connectivity: Connectivity,
}

impl<T: Pixel, L: Pixel> DoubleThresholdParams<T, L> {
    /// Create parameters for thresholds `t1 ≤ t2` (candidates) and
    /// `t3 ≤ t4` (seeds), with default labels and face connectivity.
    pub fn new(t1: T, t2: T, t3: T, t4: T) -> Self {
        Self {
            bands: ThresholdBands::new(t1, t2, t3, t4),
            inside_value: L::max_value(),
            outside_value: L::zero(),
            connectivity: Connectivity::Face,
        }
    }

    /// Set the inside label
    pub fn with_inside_value(mut self, value: L) -> Self {
        self.inside_value = value;
        self
    }

    /// Set the outside label
    pub fn with_outside_value(mut self, value: L) -> Self {
        self.outside_value = value;
        self
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Replace the thresholds
    pub fn with_bands(mut self, bands: ThresholdBands<T>) -> Self {
        self.bands = bands;
        self
    }
}

impl<T: Pixel, L: Pixel> Default for DoubleThresholdParams<T, L> {
    /// Every value is a candidate; only the type's maximum is a seed.
    fn default() -> Self {
        Self::new(T::min_value(), T::max_value(), T::max_value(), T::max_value())
    }
}

/// Output of [`double_threshold_segmentation`].
#[derive(Debug, Clone)]
pub struct Segmentation<L> {
    /// Label image with the input's extent
    pub labels: NdImage<L>,
    /// Seed, candidate, inside and component counts
    pub stats: GrowthStats,
}

/// Segment `image` with a double threshold.
///
/// The input is borrowed and never modified; the returned label image has
/// the same extent.
///
/// # Examples
///
/// ```
/// use dthresh_core::NdImage;
/// use dthresh_region::{DoubleThresholdParams, double_threshold};
///
/// // A candidate run touching a seed, and an unseeded candidate run
/// let image = NdImage::from_rows(7, 1, vec![150u8, 150, 250, 0, 150, 150, 0]).unwrap();
/// let params = DoubleThresholdParams::new(100, 220, 230, 255);
/// let labels: NdImage<u8> = double_threshold(&image, &params).unwrap();
/// assert_eq!(labels.data(), &[255, 255, 255, 0, 0, 0, 0]);
/// ```
pub fn double_threshold<T: Pixel, L: Pixel>(
    image: &NdImage<T>,
    params: &DoubleThresholdParams<T, L>,
) -> RegionResult<NdImage<L>> {
    double_threshold_segmentation(image, params, &mut NoProgress).map(|s| s.labels)
}

/// Like [`double_threshold`], reporting progress to `progress`.
pub fn double_threshold_with_progress<T, L, P>(
    image: &NdImage<T>,
    params: &DoubleThresholdParams<T, L>,
    progress: &mut P,
) -> RegionResult<NdImage<L>>
where
    T: Pixel,
    L: Pixel,
    P: ProgressObserver + ?Sized,
{
    double_threshold_segmentation(image, params, progress).map(|s| s.labels)
}

/// Segment `image` and return the labels together with growth statistics.
///
/// Progress is reported from `0.0` to `1.0`: the classification scan covers
/// the first half and region growing the second.
pub fn double_threshold_segmentation<T, L, P>(
    image: &NdImage<T>,
    params: &DoubleThresholdParams<T, L>,
    progress: &mut P,
) -> RegionResult<Segmentation<L>>
where
    T: Pixel,
    L: Pixel,
    P: ProgressObserver + ?Sized,
{
    let bands = &params.bands;
    if bands.candidate_band_is_empty() {
        log::warn!(
            "candidate band [{:?}, {:?}] is empty; only seed pixels can be inside",
            bands.threshold1,
            bands.threshold2
        );
    }
    if bands.seed_band_is_empty() {
        log::warn!(
            "seed band [{:?}, {:?}] is empty; output will be all outside",
            bands.threshold3,
            bands.threshold4
        );
    }

    let started = Instant::now();
    let num_pixels = image.num_pixels();
    progress.report(0.0);

    let mut ticker = ProgressTicker::new(&mut *progress, 0.0, 0.5, num_pixels);
    let mask = classify_tracked(image, bands, &mut ticker);
    ticker.finish();

    let mut ticker = ProgressTicker::new(&mut *progress, 0.5, 1.0, num_pixels);
    let grown = grow_tracked(
        mask,
        params.connectivity,
        params.inside_value,
        params.outside_value,
        &mut ticker,
    );
    ticker.finish();

    let stats = grown.stats;
    log::debug!(
        "double threshold over {:?} ({} connectivity): {} seeds, {} candidates, \
         {} components, {} inside in {:?}",
        image.sizes(),
        params.connectivity,
        stats.seeds,
        stats.candidates,
        stats.components,
        stats.inside,
        started.elapsed()
    );

    Ok(Segmentation {
        labels: grown.labels,
        stats,
    })
}
