//! PNG image format support
//!
//! Reads every PNG color type into a single-channel image: gray samples are
//! taken as-is, color samples are reduced to luminance and alpha is
//! dropped. Only 2-D images can be written.

use crate::{GrayImage, IoError, IoResult};
use dthresh_core::{Extent, NdImage};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(reader);
    // Palette, low bit depths and tRNS become plain 8/16-bit samples
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width as usize;
    let height = output_info.height as usize;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let extent = Extent::new([width, height])?;

    log::debug!(
        "read PNG {}x{} {:?} {:?}",
        width,
        height,
        color_type,
        bit_depth
    );

    match bit_depth {
        BitDepth::Eight => {
            let mut pixels = Vec::with_capacity(width * height);
            for row in data.chunks_exact(bytes_per_row).take(height) {
                for px in row[..width * samples].chunks_exact(samples) {
                    let value = match samples {
                        1 | 2 => px[0],
                        _ => luminance(px[0] as u32, px[1] as u32, px[2] as u32) as u8,
                    };
                    pixels.push(value);
                }
            }
            Ok(GrayImage::Gray8(NdImage::from_vec(extent, pixels)?))
        }
        BitDepth::Sixteen => {
            let mut pixels = Vec::with_capacity(width * height);
            for row in data.chunks_exact(bytes_per_row).take(height) {
                for px in row[..width * samples * 2].chunks_exact(samples * 2) {
                    let sample = |i: usize| u16::from_be_bytes([px[2 * i], px[2 * i + 1]]) as u32;
                    let value = match samples {
                        1 | 2 => sample(0),
                        _ => luminance(sample(0), sample(1), sample(2)),
                    };
                    pixels.push(value as u16);
                }
            }
            Ok(GrayImage::Gray16(NdImage::from_vec(extent, pixels)?))
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG bit depth after expansion: {:?}",
            other
        ))),
    }
}

/// Rec. 601 luma, rounded
fn luminance(r: u32, g: u32, b: u32) -> u32 {
    (r * 299 + g * 587 + b * 114 + 500) / 1000
}

/// Write an 8-bit grayscale PNG image
pub fn write_png_gray8<W: Write>(image: &NdImage<u8>, writer: W) -> IoResult<()> {
    let (width, height) = png_size(image.sizes())?;
    write_gray(writer, width, height, BitDepth::Eight, image.data())
}

/// Write a 16-bit grayscale PNG image
pub fn write_png_gray16<W: Write>(image: &NdImage<u16>, writer: W) -> IoResult<()> {
    let (width, height) = png_size(image.sizes())?;
    let data: Vec<u8> = image
        .data()
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    write_gray(writer, width, height, BitDepth::Sixteen, &data)
}

fn write_gray<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    bit_depth: BitDepth,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

/// PNG stores non-empty 2-D images only
fn png_size(sizes: &[usize]) -> IoResult<(u32, u32)> {
    let &[width, height] = sizes else {
        return Err(IoError::UnsupportedFormat(format!(
            "PNG stores 2-D images, got extent {:?}",
            sizes
        )));
    };
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "PNG cannot store an empty image {}x{}",
            width, height
        )));
    }
    let width = u32::try_from(width)
        .map_err(|_| IoError::InvalidData(format!("width {} too large", width)))?;
    let height = u32::try_from(height)
        .map_err(|_| IoError::InvalidData(format!("height {} too large", height)))?;
    Ok((width, height))
}
