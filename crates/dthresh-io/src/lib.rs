//! dthresh-io - Grayscale image I/O for dthresh
//!
//! Reads and writes 2-D single-channel images. Supported formats:
//!
//! - PNG (feature `png-format`, enabled by default): 8- and 16-bit
//!   grayscale; color images are read as luminance
//!
//! # Example
//!
//! ```
//! use dthresh_core::NdImage;
//! use dthresh_io::{GrayImage, ImageFormat, read_image_mem, write_image_mem};
//!
//! let image = NdImage::from_rows(2, 2, vec![0u8, 64, 128, 255]).unwrap();
//! let bytes = write_image_mem(&GrayImage::from(image.clone()), ImageFormat::Png).unwrap();
//! let back = read_image_mem(&bytes).unwrap();
//! assert_eq!(back.bit_depth(), 8);
//! assert_eq!(back.sizes(), &[2, 2]);
//! ```

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use dthresh_core::NdImage;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// A decoded single-channel image, in the sample width of its file.
#[derive(Debug, Clone)]
pub enum GrayImage {
    /// 8 bits per sample (also used for expanded 1/2/4-bit files)
    Gray8(NdImage<u8>),
    /// 16 bits per sample
    Gray16(NdImage<u16>),
}

impl GrayImage {
    /// Get the image sizes
    pub fn sizes(&self) -> &[usize] {
        match self {
            Self::Gray8(image) => image.sizes(),
            Self::Gray16(image) => image.sizes(),
        }
    }

    /// Bits per sample (8 or 16)
    pub fn bit_depth(&self) -> u32 {
        match self {
            Self::Gray8(_) => 8,
            Self::Gray16(_) => 16,
        }
    }
}

impl From<NdImage<u8>> for GrayImage {
    fn from(image: NdImage<u8>) -> Self {
        Self::Gray8(image)
    }
}

impl From<NdImage<u16>> for GrayImage {
    fn from(image: NdImage<u16>) -> Self {
        Self::Gray16(image)
    }
}

/// Read an image from a file path, detecting its format from the header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    log::debug!("reading {} as {:?}", path.display(), format);
    read_image_format(BufReader::new(file), format)
}

/// Read an image from memory, detecting its format from the header.
pub fn read_image_mem(data: &[u8]) -> IoResult<GrayImage> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<GrayImage>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        _ => {
            let _ = reader;
            Err(IoError::UnsupportedFormat(format!(
                "reading {:?} is not supported",
                format
            )))
        }
    }
}

/// Write an image to a file path in `format`.
pub fn write_image<P: AsRef<Path>>(
    image: &GrayImage,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(image, &mut writer, format)?;
    writer.flush()?;
    log::debug!(
        "wrote {:?} {}-bit image to {}",
        image.sizes(),
        image.bit_depth(),
        path.display()
    );
    Ok(())
}

/// Encode an image into memory in `format`.
pub fn write_image_mem(image: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(image, &mut buf, format)?;
    Ok(buf)
}

fn write_image_format<W: Write>(
    image: &GrayImage,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => match image {
            GrayImage::Gray8(pix) => png::write_png_gray8(pix, writer),
            GrayImage::Gray16(pix) => png::write_png_gray16(pix, writer),
        },
        _ => {
            let _ = (image, writer);
            Err(IoError::UnsupportedFormat(format!(
                "writing {:?} is not supported",
                format
            )))
        }
    }
}
