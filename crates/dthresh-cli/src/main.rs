//! `dthresh` - segment a grayscale image with a double threshold
//!
//! Reads `input`, labels every pixel connected to a seed in `[t3, t4]`
//! through pixels in `[t1, t2]`, spreads the two labels over `0..=255`
//! and writes the result as an 8-bit PNG.
//!
//! ```text
//! dthresh input.png output.png 100 220 230 255 --connectivity full
//! ```

use anyhow::{Context, bail};
use clap::Parser;
use dthresh_core::{NdImage, Pixel};
use dthresh_io::{GrayImage, ImageFormat};
use dthresh_region::{Connectivity, DoubleThresholdParams, double_threshold_segmentation};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Double-threshold segmentation of grayscale images",
    allow_negative_numbers = true
)]
struct Cli {
    /// Input image
    input: PathBuf,

    /// Output image (8-bit PNG)
    output: PathBuf,

    /// Lower bound of the candidate band
    threshold1: i64,

    /// Upper bound of the candidate band
    threshold2: i64,

    /// Lower bound of the seed band
    threshold3: i64,

    /// Upper bound of the seed band
    threshold4: i64,

    /// Label of pixels connected to a seed
    #[arg(long, default_value_t = 255)]
    inside: i64,

    /// Label of all other pixels
    #[arg(long, default_value_t = 0)]
    outside: i64,

    /// Neighborhood used for growing: face or full
    #[arg(long, default_value_t = Connectivity::Face)]
    connectivity: Connectivity,

    /// Log progress while segmenting
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = dthresh_io::read_image(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    log::info!(
        "read {} ({:?}, {}-bit)",
        cli.input.display(),
        input.sizes(),
        input.bit_depth()
    );

    let labels = match &input {
        GrayImage::Gray8(image) => segment(image, cli)?,
        GrayImage::Gray16(image) => segment(image, cli)?,
    };

    let format = match ImageFormat::from_path(&cli.output) {
        ImageFormat::Unknown => ImageFormat::Png,
        format => format,
    };
    let display: NdImage<u8> = labels.rescale_intensity(0, 255);
    dthresh_io::write_image(&GrayImage::from(display), &cli.output, format)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!("wrote {}", cli.output.display());

    Ok(())
}

/// Convert the closed band `[low, high]` into pixel type `T`.
///
/// Bounds are clamped into `T`'s range, which keeps membership unchanged
/// for every representable value. A band lying entirely outside that range
/// becomes the empty band `[max, min]`.
fn band_in_range<T: Pixel>(low: i64, high: i64) -> (T, T) {
    let (min, max) = (T::min_value(), T::max_value());
    if low > high || (high as f64) < min.as_f64() || (low as f64) > max.as_f64() {
        return (max, min);
    }
    (T::from_i64_clamped(low), T::from_i64_clamped(high))
}

/// Segment `image` with the thresholds and labels given on the command line.
fn segment<T: Pixel>(image: &NdImage<T>, cli: &Cli) -> anyhow::Result<NdImage<i32>> {
    if image.is_empty() {
        bail!("input image is empty");
    }

    let (t1, t2) = band_in_range::<T>(cli.threshold1, cli.threshold2);
    let (t3, t4) = band_in_range::<T>(cli.threshold3, cli.threshold4);
    let params: DoubleThresholdParams<T, i32> = DoubleThresholdParams::new(t1, t2, t3, t4)
        .with_inside_value(i32::from_i64_clamped(cli.inside))
    .with_outside_value(i32::from_i64_clamped(cli.outside))
    .with_connectivity(cli.connectivity);

    let segmentation = if cli.progress {
        let mut next = 0.0f32;
        let mut observer = |fraction: f32| {
            if fraction >= next {
                log::info!("progress {:3.0}%", fraction * 100.0);
                next = fraction + 0.1;
            }
        };
        double_threshold_segmentation(image, &params, &mut observer)?
    } else {
        double_threshold_segmentation(image, &params, &mut dthresh_region::NoProgress)?
    };

    let stats = segmentation.stats;
    log::info!(
        "{} seeds, {} candidates, {} seeded components, {} pixels inside",
        stats.seeds,
        stats.candidates,
        stats.components,
        stats.inside
    );

    Ok(segmentation.labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dthresh_core::Extent;
    use std::ffi::OsString;

    #[test]
    fn test_parse_positional() {
        let cli = Cli::try_parse_from(["dthresh", "in.png", "out.png", "100", "220", "230", "255"])
            .unwrap();
        assert_eq!(cli.input, PathBuf::from("in.png"));
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(
            (cli.threshold1, cli.threshold2, cli.threshold3, cli.threshold4),
            (100, 220, 230, 255)
        );
        assert_eq!(cli.inside, 255);
        assert_eq!(cli.outside, 0);
        assert_eq!(cli.connectivity, Connectivity::Face);
        assert!(!cli.progress);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "dthresh",
            "in.png",
            "out.png",
            "-5",
            "10",
            "20",
            "30",
            "--inside",
            "1",
            "--outside",
            "-1",
            "--connectivity",
            "full",
            "--progress",
        ])
        .unwrap();
        assert_eq!(cli.threshold1, -5);
        assert_eq!(cli.inside, 1);
        assert_eq!(cli.outside, -1);
        assert_eq!(cli.connectivity, Connectivity::Full);
        assert!(cli.progress);
    }

    #[test]
    fn test_wrong_argument_count() {
        assert!(Cli::try_parse_from(["dthresh", "in.png", "out.png", "1", "2", "3"]).is_err());
        assert!(Cli::try_parse_from(["dthresh"]).is_err());
        assert!(
            Cli::try_parse_from(["dthresh", "a", "b", "1", "2", "3", "4", "5"]).is_err()
        );
    }

    #[test]
    fn test_bad_values() {
        assert!(Cli::try_parse_from(["dthresh", "a", "b", "x", "2", "3", "4"]).is_err());
        assert!(
            Cli::try_parse_from([
                "dthresh",
                "a",
                "b",
                "1",
                "2",
                "3",
                "4",
                "--connectivity",
                "diagonal"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_segment_clamps_thresholds() {
        let cli = Cli::try_parse_from(["dthresh", "a", "b", "100", "1000", "250", "999"]).unwrap();
        let image = NdImage::from_rows(4, 1, vec![0u8, 150, 255, 50]).unwrap();
        let labels = segment(&image, &cli).unwrap();
        assert_eq!(labels.data(), &[0, 255, 255, 0]);
    }

    #[test]
    fn test_segment_band_above_range_is_empty() {
        let cli = Cli::try_parse_from(["dthresh", "a", "b", "0", "50", "300", "400"]).unwrap();
        let image = NdImage::from_rows(3, 1, vec![255u8, 40, 0]).unwrap();
        let labels = segment(&image, &cli).unwrap();
        assert_eq!(labels.data(), &[0, 0, 0]);
    }

    #[test]
    fn test_segment_band_below_range_is_empty() {
        let cli = Cli::try_parse_from(["dthresh", "a", "b", "-10", "-1", "200", "255"]).unwrap();
        let image = NdImage::from_rows(3, 1, vec![250u8, 0, 0]).unwrap();
        let labels = segment(&image, &cli).unwrap();
        assert_eq!(labels.data(), &[255, 0, 0]);
    }

    #[test]
    fn test_band_in_range() {
        assert_eq!(band_in_range::<u8>(-10, 300), (0, 255));
        assert_eq!(band_in_range::<u8>(200, 300), (200, 255));
        assert_eq!(band_in_range::<u8>(256, 300), (255, 0));
        assert_eq!(band_in_range::<u8>(-5, -1), (255, 0));
        assert_eq!(band_in_range::<u8>(20, 10), (255, 0));
        assert_eq!(band_in_range::<u16>(0, 65535), (0, 65535));
        assert_eq!(band_in_range::<u16>(65536, 70000), (65535, 0));
    }

    #[test]
    fn test_segment_rejects_empty() {
        let cli = Cli::try_parse_from(["dthresh", "a", "b", "1", "2", "3", "4"]).unwrap();
        let image = NdImage::<u16>::new(Extent::new([0, 0]).unwrap());
        assert!(segment(&image, &cli).is_err());
    }

    /// Write `image` to a temp PNG, run the full pipeline on it and read
    /// back the written labels.
    fn run_on(name: &str, image: NdImage<u16>, thresholds: [&str; 4]) -> NdImage<u8> {
        let dir = std::env::temp_dir()
            .join(format!("dthresh-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.png");
        let output = dir.join("out.png");
        dthresh_io::write_image(&GrayImage::from(image), &input, ImageFormat::Png).unwrap();

        let mut args: Vec<OsString> = vec!["dthresh".into(), input.into(), output.clone().into()];
        args.extend(thresholds.iter().map(OsString::from));
        let cli = Cli::try_parse_from(args).unwrap();
        run(&cli).unwrap();

        let GrayImage::Gray8(result) = dthresh_io::read_image(&output).unwrap() else {
            panic!("expected 8-bit output");
        };
        std::fs::remove_dir_all(&dir).ok();
        result
    }

    #[test]
    fn test_run_end_to_end() {
        let image = NdImage::from_rows(5, 1, vec![150u16, 250, 150, 0, 150]).unwrap();
        let result = run_on("mixed", image, ["100", "220", "230", "255"]);
        assert_eq!(result.data(), &[255, 255, 255, 0, 0]);
    }

    #[test]
    fn test_run_all_inside_writes_zeros() {
        // A single label value rescales to the lower output bound
        let image = NdImage::from_rows(3, 2, vec![240u16; 6]).unwrap();
        let result = run_on("all-inside", image, ["100", "220", "230", "255"]);
        assert!(result.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_run_all_outside_writes_zeros() {
        let image = NdImage::from_rows(3, 2, vec![150u16; 6]).unwrap();
        let result = run_on("all-outside", image, ["100", "220", "230", "255"]);
        assert!(result.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_run_unknown_extension_writes_png() {
        let dir = std::env::temp_dir().join(format!("dthresh-cli-ext-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.png");
        let output = dir.join("labels.out");
        let image = NdImage::from_rows(2, 1, vec![250u8, 0]).unwrap();
        dthresh_io::write_image(&GrayImage::from(image), &input, ImageFormat::Png).unwrap();

        let args: Vec<OsString> = vec![
            "dthresh".into(),
            input.into(),
            output.clone().into(),
            "100".into(),
            "220".into(),
            "230".into(),
            "255".into(),
        ];
        run(&Cli::try_parse_from(args).unwrap()).unwrap();
        assert_eq!(
            dthresh_io::detect_format(&output).unwrap(),
            ImageFormat::Png
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
