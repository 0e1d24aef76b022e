//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use dthresh_core::{NdImage, Pixel};
use dthresh_io::{GrayImage, ImageFormat};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized is `Compare`
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "double_threshold")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never matches
        if diff.is_nan() || diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images for identical extent and pixels
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_images<T: Pixel>(&mut self, expected: &NdImage<T>, actual: &NdImage<T>) -> bool {
        self.index += 1;

        match expected.first_difference(actual) {
            Err(_) => {
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - extent mismatch {:?} vs {:?}",
                    self.test_name,
                    self.index,
                    expected.sizes(),
                    actual.sizes()
                );
                self.fail(msg);
                false
            }
            Ok(Some(at)) => {
                let mut coords = vec![0; expected.ndim()];
                expected.extent().coords_of(at, &mut coords);
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - pixel mismatch at {:?}: \
                     expected {:?}, got {:?}",
                    self.test_name,
                    self.index,
                    coords,
                    expected.data()[at],
                    actual.data()[at]
                );
                self.fail(msg);
                false
            }
            Ok(None) => true,
        }
    }

    /// Write a 2-D 8-bit image to the regout directory and check it
    /// against its golden file
    ///
    /// In generate mode the written file becomes the golden file. In compare
    /// mode the pixels are compared with the golden file if one exists;
    /// a missing golden file is reported but is not a failure.
    pub fn write_image_and_check(&mut self, image: &NdImage<u8>) -> TestResult<()> {
        self.index += 1;

        let ext = ImageFormat::Png.extension();
        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        dthresh_io::write_image(&GrayImage::from(image.clone()), &local_path, ImageFormat::Png)
            .map_err(|e| TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            })?;

        self.check_file(&local_path, image)
    }

    fn check_file(&mut self, local_path: &str, image: &NdImage<u8>) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file for index {}: {}", self.index, golden_path);
                    return Ok(());
                }

                let golden = match dthresh_io::read_image(&golden_path) {
                    Ok(GrayImage::Gray8(golden)) => golden,
                    Ok(GrayImage::Gray16(_)) => {
                        return Err(TestError::ImageLoad {
                            path: golden_path,
                            message: "expected an 8-bit golden image".to_string(),
                        });
                    }
                    Err(e) => {
                        return Err(TestError::ImageLoad {
                            path: golden_path,
                            message: e.to_string(),
                        });
                    }
                };

                if !golden.equals(image) {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {
                eprintln!("Wrote: {}", local_path);
            }
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
