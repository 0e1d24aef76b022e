//! dthresh-core - Basic data structures for N-dimensional image processing
//!
//! This crate provides the fundamental data structures used throughout
//! dthresh:
//!
//! - [`Extent`] - Per-dimension image size with index/coordinate mapping
//! - [`NdImage`] / [`NdImageMut`] - The scalar image container (immutable / mutable)
//! - [`Pixel`] - The scalar types an image can hold
//!
//! Images are cheap to clone (the pixel buffer is shared) and are mutated
//! only through an exclusively owned [`NdImageMut`].
//!
//! # Example
//!
//! ```
//! use dthresh_core::{Extent, NdImage};
//!
//! let image = NdImage::from_fn(Extent::new([8, 8, 4]).unwrap(), |c| (c[0] + c[1] + c[2]) as u16);
//! assert_eq!(image.ndim(), 3);
//! assert_eq!(image.get(&[7, 7, 3]), Some(17));
//! ```

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::rescale::LinearMap;
pub use image::{Extent, NdImage, NdImageMut};
pub use pixel::Pixel;
