//! Image comparison

use super::NdImage;
use crate::error::Result;
use crate::pixel::Pixel;

impl<T: Pixel> NdImage<T> {
    /// Check if two images have the same extent and identical pixels.
    ///
    /// NaN pixels compare unequal, as with `PartialEq` on floats.
    pub fn equals(&self, other: &NdImage<T>) -> bool {
        self.sizes() == other.sizes() && self.data() == other.data()
    }

    /// Count pixels whose values differ between two images.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DimensionMismatch`] if the extents differ.
    pub fn count_differences(&self, other: &NdImage<T>) -> Result<usize> {
        self.extent().check_same(other.extent())?;
        Ok(self
            .data()
            .iter()
            .zip(other.data())
            .filter(|(a, b)| a != b)
            .count())
    }

    /// Linear index of the first differing pixel, if any.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DimensionMismatch`] if the extents differ.
    pub fn first_difference(&self, other: &NdImage<T>) -> Result<Option<usize>> {
        self.extent().check_same(other.extent())?;
        Ok(self
            .data()
            .iter()
            .zip(other.data())
            .position(|(a, b)| a != b))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Extent, NdImage};

    #[test]
    fn test_equals_and_differences() {
        let a = NdImage::from_rows(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let b = NdImage::from_rows(2, 2, vec![1u8, 0, 3, 0]).unwrap();
        assert!(a.equals(&a.clone()));
        assert!(!a.equals(&b));
        assert_eq!(a.count_differences(&b).unwrap(), 2);
        assert_eq!(a.first_difference(&b).unwrap(), Some(1));
        assert_eq!(a.first_difference(&a).unwrap(), None);
    }

    #[test]
    fn test_extent_mismatch() {
        let a: NdImage<u8> = NdImage::new(Extent::new([2, 3]).unwrap());
        let b: NdImage<u8> = NdImage::new(Extent::new([3, 2]).unwrap());
        assert!(!a.equals(&b));
        assert!(matches!(
            a.count_differences(&b),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
