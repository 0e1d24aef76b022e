//! Seed fill operations
//!
//! Region growing from seed pixels through a mask of eligible pixels,
//! for images of any dimensionality. This is binary morphological
//! reconstruction: the result is the union of all mask components that
//! contain at least one seed.
//!
//! Growth uses an explicit stack over linear indices and marks each pixel in
//! the band mask the first time it is reached, so every pixel is claimed at
//! most once. Reachability does not depend on visiting order.

use crate::bands::{BAND_BITS, Band, BandMask};
use crate::connectivity::{Connectivity, NeighborOffsets};
use crate::error::{RegionError, RegionResult};
use crate::progress::{NoProgress, ProgressObserver, ProgressTicker};
use dthresh_core::{Extent, NdImage, Pixel};

/// Mask bit set on pixels that have joined a seeded region.
const GROWN: u8 = 0b100;

/// Pixel counts gathered while growing regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Pixels in the seed band
    pub seeds: usize,
    /// Pixels in the candidate band only
    pub candidates: usize,
    /// Pixels labeled inside
    pub inside: usize,
    /// Connected components that contain at least one seed
    pub components: usize,
}

/// Labels produced by region growing, with their statistics.
#[derive(Debug, Clone)]
pub struct GrownRegions<L> {
    /// Label image: inside value on grown pixels, outside value elsewhere
    pub labels: NdImage<L>,
    /// Counts gathered during growth
    pub stats: GrowthStats,
}

/// Grow regions from every seed of `mask` through seed and candidate pixels.
///
/// # Arguments
///
/// * `mask` - Band classification (see [`crate::classify_bands`])
/// * `connectivity` - Neighborhood used for growth
/// * `inside` - Label written on grown pixels
/// * `outside` - Label written everywhere else
pub fn grow_seeded_regions<L: Pixel>(
    mask: BandMask,
    connectivity: Connectivity,
    inside: L,
    outside: L,
) -> GrownRegions<L> {
    let mut observer = NoProgress;
    let mut ticker = ProgressTicker::new(&mut observer, 0.0, 1.0, mask.extent().num_pixels());
    grow_tracked(mask, connectivity, inside, outside, &mut ticker)
}

pub(crate) fn grow_tracked<L: Pixel, P: ProgressObserver + ?Sized>(
    mask: BandMask,
    connectivity: Connectivity,
    inside: L,
    outside: L,
    ticker: &mut ProgressTicker<'_, P>,
) -> GrownRegions<L> {
    let extent = mask.extent().clone();
    let sizes = extent.sizes();
    let offsets = NeighborOffsets::new(&extent, connectivity);

    let mut flags = mask
        .into_image()
        .try_into_mut()
        .unwrap_or_else(|p| p.to_mut());
    let cells = flags.data_mut();

    let mut stats = GrowthStats::default();
    let mut stack: Vec<usize> = Vec::new();
    let mut coords = vec![0usize; extent.ndim()];

    for start in 0..cells.len() {
        let band = Band::from_bits(cells[start]);
        match band {
            Band::Seed => stats.seeds += 1,
            Band::Candidate => stats.candidates += 1,
            Band::Outside => {}
        }
        ticker.advance(1);

        if band != Band::Seed || cells[start] & GROWN != 0 {
            continue;
        }

        stats.components += 1;
        cells[start] |= GROWN;
        stack.push(start);

        while let Some(index) = stack.pop() {
            extent.coords_of(index, &mut coords);
            offsets.for_each_neighbor(sizes, index, &coords, |n| {
                let cell = cells[n];
                if cell & GROWN == 0 && cell & BAND_BITS != Band::Outside as u8 {
                    cells[n] = cell | GROWN;
                    stack.push(n);
                }
            });
        }
    }

    let flags: NdImage<u8> = flags.into();
    let labels = flags.map(|cell| if cell & GROWN != 0 { inside } else { outside });
    stats.inside = flags.data().iter().filter(|&&c| c & GROWN != 0).count();

    GrownRegions { labels, stats }
}

/// Seed fill for binary images (binary reconstruction)
///
/// Keeps every connected component of nonzero `mask` pixels that contains a
/// nonzero `seed` pixel. Seed pixels outside the mask are ignored.
///
/// # Arguments
///
/// * `seed` - Seed image (nonzero = seed)
/// * `mask` - Mask image (nonzero = fillable)
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// A new image with 1 on filled pixels and 0 elsewhere.
///
/// # Errors
///
/// Returns [`RegionError::DimensionMismatch`] if `seed` and `mask` have
/// different extents.
pub fn seedfill_binary(
    seed: &NdImage<u8>,
    mask: &NdImage<u8>,
    connectivity: Connectivity,
) -> RegionResult<NdImage<u8>> {
    check_same_extent(seed.extent(), mask.extent())?;

    let bands: Vec<u8> = seed
        .data()
        .iter()
        .zip(mask.data())
        .map(|(&s, &m)| match (s != 0, m != 0) {
            (_, false) => Band::Outside as u8,
            (true, true) => Band::Seed as u8,
            (false, true) => Band::Candidate as u8,
        })
        .collect();
    let bands = BandMask::from_raw(NdImage::from_vec(mask.extent().clone(), bands)?);

    Ok(grow_seeded_regions(bands, connectivity, 1u8, 0u8).labels)
}

/// Flood fill from a single seed pixel through pixels equal to the seed's
/// value, returning a 0/1 image of the filled region.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `seed` is outside the
/// image.
pub fn floodfill<T: Pixel>(
    image: &NdImage<T>,
    seed: &[usize],
    connectivity: Connectivity,
) -> RegionResult<NdImage<u8>> {
    let index = image.extent().index_of(seed).ok_or_else(|| {
        RegionError::InvalidParameters(format!(
            "seed {:?} outside image {:?}",
            seed,
            image.sizes()
        ))
    })?;
    let value = image.data()[index];

    let bands = image.map(|v| {
        if v == value {
            Band::Candidate as u8
        } else {
            Band::Outside as u8
        }
    });
    let mut bands = bands.try_into_mut().unwrap_or_else(|p| p.to_mut());
    bands.data_mut()[index] = Band::Seed as u8;

    Ok(grow_seeded_regions(BandMask::from_raw(bands.into()), connectivity, 1u8, 0u8).labels)
}

pub(crate) fn check_same_extent(expected: &Extent, actual: &Extent) -> RegionResult<()> {
    if expected.sizes() != actual.sizes() {
        return Err(RegionError::DimensionMismatch {
            expected: expected.sizes().to_vec(),
            actual: actual.sizes().to_vec(),
        });
    }
    Ok(())
}
