#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

//! # unblack
//!
//! Batch conversion of solid black image backgrounds into transparency.
//!
//! The crate has two cooperating parts:
//!
//! - **Transform engine** ([`transform`]): a pure per-pixel rule that
//!   classifies a pixel as black background when all three color channels
//!   are at or below a threshold (default 30), and sets its alpha to zero.
//!   Already-transparent pixels stay background, so the rule is idempotent.
//! - **Batch orchestrator** ([`batch`]): discovers matching files under an
//!   input root, mirrors their relative paths into an output root, runs the
//!   transform per file and folds per-file outcomes into an aggregate
//!   [`BatchResult`]. A single file's failure never aborts the run.
//!
//! Outputs are always written in a lossless, transparency-capable format:
//! mirrored paths with a JPEG-family extension are rewritten to `.png`
//! before the write, because transparency cannot round-trip through JPEG.
//!
//! ## Quick start
//!
//! ### Batch processing a directory tree
//!
//! ```rust,no_run
//! use unblack::{BatchConfig, BatchRunner, ThresholdPolicy};
//!
//! # fn example() -> unblack::Result<()> {
//! let config = BatchConfig::builder()
//!     .input_root("photos/")
//!     .threshold(30)
//!     .extensions([".jpg", ".jpeg"])
//!     .build()?;
//!
//! let result = BatchRunner::new(config).run()?;
//! println!(
//!     "{} total, {} succeeded, {} failed",
//!     result.total, result.succeeded, result.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Single in-memory image
//!
//! ```rust,no_run
//! use unblack::{remove_black_background_from_bytes, ThresholdPolicy};
//!
//! # fn example(bytes: &[u8]) -> unblack::Result<()> {
//! let rgba = remove_black_background_from_bytes(bytes, ThresholdPolicy::default())?;
//! rgba.save("output.png").map_err(unblack::UnblackError::from)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Progress and cancellation
//!
//! The orchestrator exposes a [`ProgressReporter`] hook invoked after each
//! file task with `(index, total, path, outcome)` and a cooperative
//! [`CancellationToken`] checked at task boundaries, so a front-end can run
//! the batch on a worker context and render progress without the core
//! managing threads.
//!
//! ## Feature flags
//!
//! - `cli` (default): command-line interface with progress bar
//! - `webp-support` (default): WebP counted among transparency-capable
//!   output formats

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod transform;

// Public API exports
pub use batch::{
    discover, mirror_path, process_one, run_batch, BatchResult, BatchRunner, CancellationToken,
    FileTask,
};
pub use config::{
    BatchConfig, BatchConfigBuilder, DEFAULT_EXTENSIONS, DEFAULT_OUTPUT_SUBDIR, DEFAULT_QUALITY,
};
pub use error::{Result, UnblackError};
pub use services::{
    ConsoleProgressReporter, ImageIoService, NoOpProgressReporter, OutputFormatHandler,
    ProgressReporter, TaskOutcome, TaskProgress,
};
pub use transform::{
    mask_background, remove_background, ThresholdPolicy, DEFAULT_THRESHOLD, DEFAULT_TOLERANCE,
};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig};

use image::{DynamicImage, RgbaImage};

/// Remove the black background from a decoded image
///
/// Convenience wrapper over [`transform::remove_background`] for callers who
/// already hold a [`DynamicImage`].
#[must_use]
pub fn remove_black_background(image: &DynamicImage, policy: ThresholdPolicy) -> RgbaImage {
    transform::remove_background(image, policy)
}

/// Remove the black background from encoded image bytes
///
/// Decodes `image_bytes` with content-based format detection, then applies
/// the transform. Suitable for callers that never touch the filesystem.
pub fn remove_black_background_from_bytes(
    image_bytes: &[u8],
    policy: ThresholdPolicy,
) -> Result<RgbaImage> {
    let image = image::load_from_memory(image_bytes)
        .map_err(|e| UnblackError::Decode(format!("Failed to decode image from bytes: {e}")))?;
    Ok(transform::remove_background(&image, policy))
}
