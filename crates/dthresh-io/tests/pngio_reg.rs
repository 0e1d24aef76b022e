//! PNG I/O regression test
//!
//! Tests lossless write/read of 8- and 16-bit grayscale PNG files.
//!
//! Run with:
//! ```
//! cargo test -p dthresh-io --test pngio_reg
//! ```

use dthresh_core::{Extent, NdImage};
use dthresh_io::{GrayImage, ImageFormat, IoError, read_image, write_image};
use dthresh_test::{RegParams, regout_dir};
use std::fs;

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");

    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("Failed to create output directory");

    // Test 1: 8-bit gradient
    let gray8 = NdImage::from_fn(Extent::new([64, 48]).unwrap(), |c| (c[0] * 4 + c[1]) as u8);
    let path8 = format!("{}/pngio_gray8.png", outdir);
    write_image(&GrayImage::from(gray8.clone()), &path8, ImageFormat::Png).unwrap();
    match read_image(&path8).unwrap() {
        GrayImage::Gray8(back) => {
            rp.compare_images(&gray8, &back);
        }
        GrayImage::Gray16(_) => {
            rp.compare_values(8.0, 16.0, 0.0);
        }
    }

    // Test 2: 16-bit values above the 8-bit range
    let gray16 = NdImage::from_fn(Extent::new([17, 9]).unwrap(), |c| {
        (c[0] * 3000 + c[1] * 7) as u16
    });
    let path16 = format!("{}/pngio_gray16.png", outdir);
    write_image(&GrayImage::from(gray16.clone()), &path16, ImageFormat::Png).unwrap();
    let back = read_image(&path16).unwrap();
    rp.compare_values(16.0, back.bit_depth() as f64, 0.0);
    if let GrayImage::Gray16(back) = back {
        rp.compare_images(&gray16, &back);
    }

    // Test 3: non-image file is rejected
    let junk = format!("{}/pngio_junk.png", outdir);
    fs::write(&junk, b"definitely not a png").unwrap();
    let rejected = matches!(read_image(&junk), Err(IoError::UnsupportedFormat(_)));
    rp.compare_values(1.0, if rejected { 1.0 } else { 0.0 }, 0.0);

    // Test 4: 3-D images cannot be written as PNG
    let volume = NdImage::<u8>::new(Extent::new([4, 4, 2]).unwrap());
    let path3d = format!("{}/pngio_volume.png", outdir);
    let rejected = write_image(&GrayImage::from(volume), &path3d, ImageFormat::Png).is_err();
    rp.compare_values(1.0, if rejected { 1.0 } else { 0.0 }, 0.0);

    // Test 5: unknown output format
    let rejected = matches!(
        write_image(&GrayImage::from(gray8), &path8, ImageFormat::Unknown),
        Err(IoError::UnsupportedFormat(_))
    );
    rp.compare_values(1.0, if rejected { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "pngio regression test failed");
}
