//! dthresh-test - Regression test framework for dthresh
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`], which numbers each
//! check, records failures and reports them at the end. Three modes are
//! supported:
//!
//! - **Generate**: Write label images as golden files
//! - **Compare**: Compare results with golden files when they exist
//! - **Display**: Run checks and keep the written images for inspection
//!
//! # Usage
//!
//! ```ignore
//! use dthresh_test::RegParams;
//!
//! let mut rp = RegParams::new("double_threshold");
//! rp.compare_values(9.0, inside as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // dthresh-test is at crates/dthresh-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
