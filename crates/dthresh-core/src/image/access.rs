//! Pixel access functions
//!
//! Coordinate-based and linear-index access to individual pixels.

use super::{NdImage, NdImageMut};
use crate::error::{Error, Result};
use crate::pixel::Pixel;

impl<T: Pixel> NdImage<T> {
    /// Get a pixel value at `coords`.
    ///
    /// Returns `None` if the coordinates are outside the image.
    #[inline]
    pub fn get(&self, coords: &[usize]) -> Option<T> {
        let index = self.extent().index_of(coords)?;
        Some(self.data()[index])
    }

    /// Get a pixel value by linear index.
    #[inline]
    pub fn get_linear(&self, index: usize) -> Option<T> {
        self.data().get(index).copied()
    }

    /// Get a pixel value of a 2-D image at (x, y).
    #[inline]
    pub fn get_2d(&self, x: usize, y: usize) -> Option<T> {
        self.get(&[x, y])
    }
}

impl<T: Pixel> NdImageMut<T> {
    /// Get a pixel value at `coords`.
    #[inline]
    pub fn get(&self, coords: &[usize]) -> Option<T> {
        let index = self.extent().index_of(coords)?;
        Some(self.data()[index])
    }

    /// Set a pixel value at `coords`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordsOutOfBounds`] if the coordinates are outside
    /// the image.
    pub fn set(&mut self, coords: &[usize], value: T) -> Result<()> {
        let index = self
            .extent()
            .index_of(coords)
            .ok_or_else(|| Error::CoordsOutOfBounds {
                coords: coords.to_vec(),
                sizes: self.sizes().to_vec(),
            })?;
        self.data_mut()[index] = value;
        Ok(())
    }

    /// Set a pixel value by linear index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= num_pixels`.
    pub fn set_linear(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.num_pixels();
        let slot = self
            .data_mut()
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Set a pixel value of a 2-D image at (x, y).
    #[inline]
    pub fn set_2d(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        self.set(&[x, y], value)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Extent, NdImage};

    #[test]
    fn test_set_get_roundtrip_3d() {
        let image: NdImage<i16> = NdImage::new(Extent::new([3, 4, 5]).unwrap());
        let mut image = image.try_into_mut().unwrap();
        image.set(&[2, 3, 4], -7).unwrap();
        let image: NdImage<i16> = image.into();
        assert_eq!(image.get(&[2, 3, 4]), Some(-7));
        assert_eq!(image.get_linear(2 + 3 * 3 + 4 * 12), Some(-7));
    }

    #[test]
    fn test_out_of_bounds() {
        let image: NdImage<u8> = NdImage::new(Extent::new([3, 3]).unwrap());
        assert_eq!(image.get_2d(3, 0), None);
        assert_eq!(image.get(&[0, 0, 0]), None);

        let mut image = image.to_mut();
        assert!(image.set_2d(0, 3, 1).is_err());
        assert!(image.set_linear(9, 1).is_err());
        assert!(image.set_linear(8, 1).is_ok());
    }
}
