//! N-dimensional scalar image container
//!
//! [`NdImage`] is the fundamental image type of dthresh: a dense grid of
//! scalar [`Pixel`] values addressed by integer coordinate tuples.
//!
//! # Pixel layout
//!
//! - Pixels are stored contiguously in a single `Vec<T>`
//! - Dimension 0 varies fastest (x, then y, then z, ...)
//! - The linear index of `(c0, c1, ..., cn)` is `sum(ci * stride_i)` with
//!   `stride_0 = 1` and `stride_i = stride_{i-1} * size_{i-1}`
//!
//! # Ownership model
//!
//! `NdImage` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to [`NdImageMut`] via
//! [`NdImage::try_into_mut`] or [`NdImage::to_mut`], then convert back with
//! `Into<NdImage>`.

mod access;
pub mod compare;
pub mod rescale;

use crate::error::{Error, Result};
use crate::pixel::Pixel;
use std::sync::Arc;

/// Size of an image along each of its dimensions.
///
/// An extent has at least one dimension. Individual sizes may be zero, in
/// which case the image holds no pixels.
///
/// # Examples
///
/// ```
/// use dthresh_core::Extent;
///
/// let extent = Extent::new([4, 3]).unwrap();
/// assert_eq!(extent.num_pixels(), 12);
/// assert_eq!(extent.index_of(&[1, 2]), Some(9));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extent {
    sizes: Vec<usize>,
    strides: Vec<usize>,
    num_pixels: usize,
}

impl Extent {
    /// Create an extent from per-dimension sizes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `sizes` is empty or the total
    /// pixel count overflows `usize`.
    pub fn new(sizes: impl Into<Vec<usize>>) -> Result<Self> {
        let sizes = sizes.into();
        if sizes.is_empty() {
            return Err(Error::InvalidDimension(sizes));
        }

        let mut strides = Vec::with_capacity(sizes.len());
        let mut count = 1usize;
        for &size in &sizes {
            strides.push(count);
            count = match count.checked_mul(size) {
                Some(c) => c,
                None => return Err(Error::InvalidDimension(sizes)),
            };
        }

        Ok(Self {
            sizes,
            strides,
            num_pixels: count,
        })
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.sizes.len()
    }

    /// Sizes along every dimension.
    #[inline]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Size along dimension `dim`, or 0 if `dim` is out of range.
    #[inline]
    pub fn size(&self, dim: usize) -> usize {
        self.sizes.get(dim).copied().unwrap_or(0)
    }

    /// Linear stride of every dimension.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of pixels.
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.num_pixels
    }

    /// True if the extent holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_pixels == 0
    }

    /// Check whether `coords` addresses a pixel inside this extent.
    pub fn contains(&self, coords: &[usize]) -> bool {
        coords.len() == self.sizes.len() && coords.iter().zip(&self.sizes).all(|(c, s)| c < s)
    }

    /// Linear index of `coords`, or `None` if outside the extent.
    pub fn index_of(&self, coords: &[usize]) -> Option<usize> {
        if !self.contains(coords) {
            return None;
        }
        Some(coords.iter().zip(&self.strides).map(|(c, s)| c * s).sum())
    }

    /// Decompose a linear index into coordinates, writing into `coords`.
    ///
    /// # Panics
    ///
    /// Panics if `coords.len() != self.ndim()`.
    #[inline]
    pub fn coords_of(&self, index: usize, coords: &mut [usize]) {
        assert_eq!(coords.len(), self.sizes.len(), "coordinate arity");
        let mut rest = index;
        for (c, &size) in coords.iter_mut().zip(&self.sizes) {
            if size == 0 {
                *c = 0;
                continue;
            }
            *c = rest % size;
            rest /= size;
        }
    }

    /// Check that `other` equals this extent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn check_same(&self, other: &Extent) -> Result<()> {
        if self.sizes != other.sizes {
            return Err(Error::DimensionMismatch {
                expected: self.sizes.clone(),
                actual: other.sizes.clone(),
            });
        }
        Ok(())
    }
}

/// Internal image data
#[derive(Debug, Clone)]
struct ImageData<T> {
    extent: Extent,
    data: Vec<T>,
}

/// N-dimensional scalar image.
///
/// # Examples
///
/// ```
/// use dthresh_core::{Extent, NdImage};
///
/// let image: NdImage<u8> = NdImage::new(Extent::new([64, 48]).unwrap());
/// assert_eq!(image.sizes(), &[64, 48]);
/// assert_eq!(image.get(&[10, 10]), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct NdImage<T> {
    inner: Arc<ImageData<T>>,
}

impl<T: Pixel> NdImage<T> {
    /// Create a new image with every pixel set to zero.
    pub fn new(extent: Extent) -> Self {
        Self::new_filled(extent, T::zero())
    }

    /// Create a new image with every pixel set to `value`.
    pub fn new_filled(extent: Extent, value: T) -> Self {
        let data = vec![value; extent.num_pixels()];
        Self {
            inner: Arc::new(ImageData { extent, data }),
        }
    }

    /// Wrap an existing pixel buffer laid out in linear order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len()` differs from the
    /// extent's pixel count.
    pub fn from_vec(extent: Extent, data: Vec<T>) -> Result<Self> {
        if data.len() != extent.num_pixels() {
            return Err(Error::DataLength {
                expected: extent.num_pixels(),
                actual: data.len(),
            });
        }
        Ok(Self {
            inner: Arc::new(ImageData { extent, data }),
        })
    }

    /// Build an image by evaluating `f` at every coordinate, in linear order.
    pub fn from_fn(extent: Extent, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let mut coords = vec![0usize; extent.ndim()];
        let data = (0..extent.num_pixels())
            .map(|i| {
                extent.coords_of(i, &mut coords);
                f(&coords)
            })
            .collect();
        Self {
            inner: Arc::new(ImageData { extent, data }),
        }
    }

    /// Convenience constructor for 2-D images stored row by row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len() != width * height`.
    pub fn from_rows(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        Self::from_vec(Extent::new([width, height])?, data)
    }

    /// Create a zeroed image of another pixel type with the same extent.
    pub fn create_template<U: Pixel>(&self) -> NdImage<U> {
        NdImage::new(self.inner.extent.clone())
    }

    /// Get the image extent.
    #[inline]
    pub fn extent(&self) -> &Extent {
        &self.inner.extent
    }

    /// Get the sizes along every dimension.
    #[inline]
    pub fn sizes(&self) -> &[usize] {
        self.inner.extent.sizes()
    }

    /// Get the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.inner.extent.ndim()
    }

    /// Get the total number of pixels.
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.inner.extent.num_pixels()
    }

    /// True if the image holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.extent.is_empty()
    }

    /// Get raw access to the pixel data in linear order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.inner.data
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a deep copy of this image.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Self {
            inner: Arc::new(ImageData::clone(&self.inner)),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<NdImageMut<T>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(NdImageMut { inner: data }),
            Err(arc) => Err(Self { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> NdImageMut<T> {
        NdImageMut {
            inner: ImageData::clone(&self.inner),
        }
    }

    /// Minimum and maximum pixel values, ignoring NaN.
    ///
    /// Returns `None` for an empty image or one holding only NaN.
    pub fn min_max(&self) -> Option<(T, T)> {
        let mut iter = self.inner.data.iter().copied().filter(|v| !v.is_nan());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        }))
    }

    /// Apply `f` to every pixel, producing a new image of the same extent.
    pub fn map<U: Pixel>(&self, f: impl Fn(T) -> U) -> NdImage<U> {
        NdImage {
            inner: Arc::new(ImageData {
                extent: self.inner.extent.clone(),
                data: self.inner.data.iter().map(|&v| f(v)).collect(),
            }),
        }
    }
}

/// Mutable N-dimensional image.
///
/// Obtained from [`NdImage::try_into_mut`] or [`NdImage::to_mut`] and
/// converted back with `Into<NdImage>`.
#[derive(Debug)]
pub struct NdImageMut<T> {
    inner: ImageData<T>,
}

impl<T: Pixel> NdImageMut<T> {
    /// Get the image extent.
    #[inline]
    pub fn extent(&self) -> &Extent {
        &self.inner.extent
    }

    /// Get the sizes along every dimension.
    #[inline]
    pub fn sizes(&self) -> &[usize] {
        self.inner.extent.sizes()
    }

    /// Get the total number of pixels.
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.inner.extent.num_pixels()
    }

    /// Get raw access to the pixel data in linear order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.inner.data
    }

    /// Get mutable access to the pixel data in linear order.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.inner.data
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: T) {
        self.inner.data.fill(value);
    }
}

impl<T> From<NdImageMut<T>> for NdImage<T> {
    fn from(image: NdImageMut<T>) -> Self {
        NdImage {
            inner: Arc::new(image.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_strides_and_count() {
        let extent = Extent::new([4, 3, 2]).unwrap();
        assert_eq!(extent.ndim(), 3);
        assert_eq!(extent.strides(), &[1, 4, 12]);
        assert_eq!(extent.num_pixels(), 24);
        assert!(!extent.is_empty());
    }

    #[test]
    fn test_extent_rejects_no_dimensions() {
        assert!(Extent::new(Vec::new()).is_err());
    }

    #[test]
    fn test_extent_rejects_overflow() {
        assert!(Extent::new([usize::MAX, 2]).is_err());
    }

    #[test]
    fn test_extent_zero_size_is_empty() {
        let extent = Extent::new([0, 5]).unwrap();
        assert!(extent.is_empty());
        assert_eq!(extent.num_pixels(), 0);
        assert_eq!(extent.index_of(&[0, 0]), None);
    }

    #[test]
    fn test_index_coords_agree() {
        let extent = Extent::new([5, 4, 3]).unwrap();
        let mut coords = [0usize; 3];
        for i in 0..extent.num_pixels() {
            extent.coords_of(i, &mut coords);
            assert_eq!(extent.index_of(&coords), Some(i));
        }
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let extent = Extent::new([3, 3]).unwrap();
        let result = NdImage::from_vec(extent, vec![0u8; 8]);
        assert!(matches!(
            result,
            Err(Error::DataLength {
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_from_fn_layout() {
        let image = NdImage::from_fn(Extent::new([3, 2]).unwrap(), |c| (c[0] + 10 * c[1]) as u8);
        assert_eq!(image.data(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_try_into_mut_shared() {
        let image: NdImage<u8> = NdImage::new(Extent::new([2, 2]).unwrap());
        let shared = image.clone();
        assert_eq!(image.ref_count(), 2);
        let image = image.try_into_mut().unwrap_err();
        drop(shared);
        let mut image = image.try_into_mut().unwrap();
        image.fill(7);
        let image: NdImage<u8> = image.into();
        assert!(image.data().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let image: NdImage<u16> = NdImage::new_filled(Extent::new([2]).unwrap(), 3);
        let copy = image.deep_clone();
        assert_eq!(image.ref_count(), 1);
        assert_eq!(copy.data(), image.data());
    }

    #[test]
    fn test_min_max_skips_nan() {
        let image =
            NdImage::from_vec(Extent::new([4]).unwrap(), vec![f32::NAN, 2.0, -1.0, 5.0]).unwrap();
        assert_eq!(image.min_max(), Some((-1.0, 5.0)));

        let empty: NdImage<f32> = NdImage::new(Extent::new([0]).unwrap());
        assert_eq!(empty.min_max(), None);
    }
}
