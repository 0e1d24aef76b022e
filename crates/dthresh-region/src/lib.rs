//! dthresh-region - Region growing for dthresh
//!
//! This crate provides region processing functionality including:
//!
//! - **Double-threshold segmentation** - Seeded region growing between two
//!   intensity bands
//! - **Band classification** - Per-pixel seed / candidate / outside masks
//! - **Seed fill operations** - Binary reconstruction and flood fill
//! - **Connectivity** - Face and full neighborhoods in any dimension
//!
//! # Examples
//!
//! ## Double threshold
//!
//! ```
//! use dthresh_core::{Extent, NdImage};
//! use dthresh_region::{DoubleThresholdParams, double_threshold};
//!
//! // 5x5 zeros with a 3x3 block of 200 around a 250 center
//! let image = NdImage::from_fn(Extent::new([5, 5]).unwrap(), |c| match (c[0], c[1]) {
//!     (2, 2) => 250u8,
//!     (1..=3, 1..=3) => 200,
//!     _ => 0,
//! });
//!
//! let params = DoubleThresholdParams::new(100, 220, 230, 255);
//! let labels: NdImage<u8> = double_threshold(&image, &params).unwrap();
//! assert_eq!(labels.data().iter().filter(|&&v| v == 255).count(), 9);
//! ```
//!
//! ## Progress reporting
//!
//! ```
//! use dthresh_core::{Extent, NdImage};
//! use dthresh_region::{DoubleThresholdParams, double_threshold_with_progress};
//!
//! let image: NdImage<u16> = NdImage::new(Extent::new([32, 32, 8]).unwrap());
//! let params: DoubleThresholdParams<u16> = DoubleThresholdParams::new(0, 10, 20, 30);
//! let mut last = 0.0;
//! let labels = double_threshold_with_progress(&image, &params, &mut |f: f32| last = f).unwrap();
//! assert_eq!(last, 1.0);
//! assert!(labels.data().iter().all(|&v| v == 0));
//! ```
//!
//! ## Seed fill
//!
//! ```
//! use dthresh_core::NdImage;
//! use dthresh_region::{Connectivity, seedfill_binary};
//!
//! let mask = NdImage::from_rows(5, 1, vec![1u8, 1, 0, 1, 1]).unwrap();
//! let seed = NdImage::from_rows(5, 1, vec![0u8, 1, 0, 0, 0]).unwrap();
//! let filled = seedfill_binary(&seed, &mask, Connectivity::Face).unwrap();
//! assert_eq!(filled.data(), &[1, 1, 0, 0, 0]);
//! ```

pub mod bands;
pub mod connectivity;
pub mod double_threshold;
pub mod error;
pub mod progress;
pub mod seedfill;

// Re-export core types
pub use dthresh_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use bands::{Band, BandMask, ThresholdBands, classify_bands};
pub use connectivity::{Connectivity, NeighborOffsets};
pub use double_threshold::{
    DoubleThresholdParams, Segmentation, double_threshold, double_threshold_segmentation,
    double_threshold_with_progress,
};
pub use progress::{NoProgress, ProgressObserver};
pub use seedfill::{GrowthStats, GrownRegions, floodfill, grow_seeded_regions, seedfill_binary};
