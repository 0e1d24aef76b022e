//! Pixel connectivity
//!
//! Defines which pixels count as neighbors during region growing, for
//! images of any dimensionality:
//!
//! - **Face** connectivity: the `2N` axis-aligned neighbors (4 in 2-D,
//!   6 in 3-D)
//! - **Full** connectivity: every pixel of the surrounding `3^N` block
//!   except the center (8 in 2-D, 26 in 3-D)

use crate::error::{RegionError, RegionResult};
use dthresh_core::Extent;
use std::fmt;
use std::str::FromStr;

/// Connectivity type for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Axis-aligned neighbors only (4-way in 2-D, 6-way in 3-D)
    #[default]
    Face,
    /// All neighbors including diagonals (8-way in 2-D, 26-way in 3-D)
    Full,
}

impl Connectivity {
    /// Number of neighbors of an interior pixel in an `ndim`-dimensional image.
    pub fn neighbor_count(self, ndim: usize) -> usize {
        match self {
            Connectivity::Face => 2 * ndim,
            Connectivity::Full => 3usize.saturating_pow(ndim as u32) - 1,
        }
    }

    /// Select the connectivity that yields `count` neighbors in `ndim`
    /// dimensions (e.g. 4 or 8 in 2-D, 6 or 26 in 3-D).
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnsupportedConnectivity`] if no connectivity
    /// has that many neighbors.
    pub fn from_neighbor_count(ndim: usize, count: usize) -> RegionResult<Self> {
        if ndim > 0 && count == Connectivity::Face.neighbor_count(ndim) {
            Ok(Connectivity::Face)
        } else if ndim > 0 && count == Connectivity::Full.neighbor_count(ndim) {
            Ok(Connectivity::Full)
        } else {
            Err(RegionError::UnsupportedConnectivity(format!(
                "{count} neighbors in {ndim} dimensions"
            )))
        }
    }

    /// Lowercase name (`"face"` or `"full"`).
    pub fn name(self) -> &'static str {
        match self {
            Connectivity::Face => "face",
            Connectivity::Full => "full",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Connectivity {
    type Err = RegionError;

    /// Accepts `face`/`4`/`6` and `full`/`8`/`26`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "face" | "4" | "6" => Ok(Connectivity::Face),
            "full" | "8" | "26" => Ok(Connectivity::Full),
            other => Err(RegionError::UnsupportedConnectivity(other.to_string())),
        }
    }
}

/// Precomputed neighbor offsets for one extent and connectivity.
///
/// Each neighbor is stored both as a per-dimension coordinate delta (for
/// bounds checking) and as a linear index offset (for addressing).
#[derive(Debug, Clone)]
pub struct NeighborOffsets {
    ndim: usize,
    deltas: Vec<isize>,
    linear: Vec<isize>,
}

impl NeighborOffsets {
    /// Build the offset table for `extent` under `connectivity`.
    pub fn new(extent: &Extent, connectivity: Connectivity) -> Self {
        let ndim = extent.ndim();
        let strides = extent.strides();
        let mut deltas = Vec::with_capacity(connectivity.neighbor_count(ndim) * ndim);
        let mut linear = Vec::with_capacity(connectivity.neighbor_count(ndim));

        let mut push = |delta: &[isize]| {
            let offset: isize = delta
                .iter()
                .zip(strides)
                .map(|(&d, &s)| d * s as isize)
                .sum();
            deltas.extend_from_slice(delta);
            linear.push(offset);
        };

        match connectivity {
            Connectivity::Face => {
                let mut delta = vec![0isize; ndim];
                for dim in 0..ndim {
                    for step in [-1, 1] {
                        delta[dim] = step;
                        push(&delta);
                    }
                    delta[dim] = 0;
                }
            }
            Connectivity::Full => {
                // Odometer over {-1, 0, 1}^ndim, skipping the center
                let mut delta = vec![-1isize; ndim];
                loop {
                    if delta.iter().any(|&d| d != 0) {
                        push(&delta);
                    }
                    let mut dim = 0;
                    while dim < ndim && delta[dim] == 1 {
                        delta[dim] = -1;
                        dim += 1;
                    }
                    if dim == ndim {
                        break;
                    }
                    delta[dim] += 1;
                }
            }
        }

        Self {
            ndim,
            deltas,
            linear,
        }
    }

    /// Number of neighbors in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.linear.len()
    }

    /// True if the table has no neighbors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.linear.is_empty()
    }

    /// Call `f` with the linear index of every in-bounds neighbor of the
    /// pixel at `index` whose coordinates are `coords`.
    #[inline]
    pub fn for_each_neighbor(
        &self,
        sizes: &[usize],
        index: usize,
        coords: &[usize],
        mut f: impl FnMut(usize),
    ) {
        for (k, &offset) in self.linear.iter().enumerate() {
            let delta = &self.deltas[k * self.ndim..(k + 1) * self.ndim];
            let inside = delta
                .iter()
                .zip(coords)
                .zip(sizes)
                .all(|((&d, &c), &size)| match d {
                    -1 => c > 0,
                    1 => c + 1 < size,
                    _ => true,
                });
            if inside {
                f(index.wrapping_add_signed(offset));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(extent: &Extent, connectivity: Connectivity, coords: &[usize]) -> Vec<usize> {
        let offsets = NeighborOffsets::new(extent, connectivity);
        let index = extent.index_of(coords).unwrap();
        let mut out = Vec::new();
        offsets.for_each_neighbor(extent.sizes(), index, coords, |n| out.push(n));
        out.sort_unstable();
        out
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(Connectivity::Face.neighbor_count(2), 4);
        assert_eq!(Connectivity::Full.neighbor_count(2), 8);
        assert_eq!(Connectivity::Face.neighbor_count(3), 6);
        assert_eq!(Connectivity::Full.neighbor_count(3), 26);
        assert_eq!(Connectivity::Full.neighbor_count(1), 2);
    }

    #[test]
    fn test_offset_table_sizes() {
        let extent = Extent::new([5, 5, 5]).unwrap();
        assert_eq!(NeighborOffsets::new(&extent, Connectivity::Face).len(), 6);
        assert_eq!(NeighborOffsets::new(&extent, Connectivity::Full).len(), 26);
    }

    #[test]
    fn test_interior_neighbors_2d() {
        let extent = Extent::new([3, 3]).unwrap();
        assert_eq!(
            neighbors_of(&extent, Connectivity::Face, &[1, 1]),
            vec![1, 3, 5, 7]
        );
        assert_eq!(
            neighbors_of(&extent, Connectivity::Full, &[1, 1]),
            vec![0, 1, 2, 3, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_corner_neighbors_clipped() {
        let extent = Extent::new([3, 3]).unwrap();
        assert_eq!(neighbors_of(&extent, Connectivity::Face, &[0, 0]), vec![1, 3]);
        assert_eq!(
            neighbors_of(&extent, Connectivity::Full, &[2, 2]),
            vec![4, 5, 7]
        );
    }

    #[test]
    fn test_no_wraparound_across_rows() {
        // (2, 0) must not see (0, 1) even though their linear indices are adjacent
        let extent = Extent::new([3, 2]).unwrap();
        assert_eq!(neighbors_of(&extent, Connectivity::Face, &[2, 0]), vec![1, 5]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("face".parse::<Connectivity>().unwrap(), Connectivity::Face);
        assert_eq!("FULL".parse::<Connectivity>().unwrap(), Connectivity::Full);
        assert_eq!("8".parse::<Connectivity>().unwrap(), Connectivity::Full);
        assert!(matches!(
            "hex".parse::<Connectivity>(),
            Err(RegionError::UnsupportedConnectivity(_))
        ));
    }

    #[test]
    fn test_from_neighbor_count() {
        assert_eq!(
            Connectivity::from_neighbor_count(3, 6).unwrap(),
            Connectivity::Face
        );
        assert_eq!(
            Connectivity::from_neighbor_count(3, 26).unwrap(),
            Connectivity::Full
        );
        assert!(Connectivity::from_neighbor_count(2, 6).is_err());
        assert!(Connectivity::from_neighbor_count(0, 0).is_err());
    }
}
