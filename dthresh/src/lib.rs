//! dthresh - Double-threshold segmentation for Rust
//!
//! Labels the pixels of an N-dimensional scalar image that are connected to
//! a *seed* (a value in `[t3, t4]`) through *candidates* (values in
//! `[t1, t2]`). This is hysteresis thresholding generalized to any
//! dimensionality and pixel type.
//!
//! # Overview
//!
//! - [`NdImage`] - N-dimensional scalar image (from `dthresh-core`)
//! - [`region`] - Band classification, region growing and the
//!   double-threshold filter
//! - [`io`] - Reading and writing grayscale PNG files
//!
//! # Example
//!
//! ```
//! use dthresh::region::{Connectivity, DoubleThresholdParams, double_threshold};
//! use dthresh::{Extent, NdImage};
//!
//! let image = NdImage::from_fn(Extent::new([4, 4, 4]).unwrap(), |c| {
//!     if c == [0, 0, 0] { 250u8 } else if c[0] == c[1] && c[1] == c[2] { 150 } else { 0 }
//! });
//! let params = DoubleThresholdParams::new(100, 220, 230, 255)
//!     .with_connectivity(Connectivity::Full);
//! let labels: NdImage<u8> = double_threshold(&image, &params).unwrap();
//! assert_eq!(labels.data().iter().filter(|&&v| v == 255).count(), 4);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use dthresh_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use dthresh_io as io;
pub use dthresh_region as region;
