//! Output format safety policy
//!
//! Background removal only round-trips through lossless formats that carry an
//! alpha channel. This module owns that capability decision, separate from
//! the path mirroring itself: mirrored output paths keep their extension when
//! it already names a transparency-capable lossless format and are rewritten
//! to PNG otherwise.

use std::path::{Path, PathBuf};

/// Extension of the fallback transparency-capable output format
pub const FALLBACK_EXTENSION: &str = "png";

/// Service for output format capability decisions
pub struct OutputFormatHandler;

impl OutputFormatHandler {
    /// Check whether a file extension names a lossless format that can
    /// represent transparency
    ///
    /// Matching is case-insensitive. JPEG-family extensions (and anything
    /// else unknown) return `false`: transparency cannot round-trip through
    /// them.
    #[must_use]
    pub fn is_transparency_capable(extension: &str) -> bool {
        match extension.to_ascii_lowercase().as_str() {
            "png" | "tiff" | "tif" => true,
            #[cfg(feature = "webp-support")]
            "webp" => true,
            _ => false,
        }
    }

    /// Rewrite an output path so its extension names a transparency-capable
    /// lossless format
    ///
    /// Paths that already carry a capable extension are returned unchanged;
    /// everything else (including extension-less paths) gets the PNG
    /// extension. The encode step selects the codec from the final extension,
    /// so this is the single place where the format-safety rule lives.
    #[must_use]
    pub fn ensure_transparency_capable(path: &Path) -> PathBuf {
        let capable = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(Self::is_transparency_capable);

        if capable {
            path.to_path_buf()
        } else {
            path.with_extension(FALLBACK_EXTENSION)
        }
    }
}
