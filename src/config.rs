//! Configuration types for batch black-background removal

use crate::error::{Result, UnblackError};
use crate::transform::ThresholdPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the output subdirectory created under the input root when no
/// output root is configured
pub const DEFAULT_OUTPUT_SUBDIR: &str = "processed";

/// File extensions matched by default during discovery
pub const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Default output quality for lossy formats (accepted for CLI parity; the
/// lossless transparency-capable outputs ignore it)
pub const DEFAULT_QUALITY: u8 = 95;

/// Configuration for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Root directory to discover input images under
    pub input_root: PathBuf,
    /// Output root; `None` resolves to `<input_root>/processed`
    pub output_root: Option<PathBuf>,
    /// Threshold policy applied to every image
    pub policy: ThresholdPolicy,
    /// Whether to descend into subdirectories during discovery
    pub recursive: bool,
    /// File extensions to match, case-insensitively, with or without a
    /// leading dot
    pub extensions: Vec<String>,
    /// Output quality (1-100). Only meaningful for lossy formats; the
    /// lossless transparency-capable outputs ignore it.
    pub quality: u8,
}

impl BatchConfig {
    /// Create a new batch configuration builder
    #[must_use]
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::new()
    }

    /// Create a configuration with defaults for the given input root
    pub fn new<P: Into<PathBuf>>(input_root: P) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: None,
            policy: ThresholdPolicy::default(),
            recursive: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Builder for `BatchConfig`
#[derive(Debug, Default)]
pub struct BatchConfigBuilder {
    input_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
    policy: ThresholdPolicy,
    recursive: Option<bool>,
    extensions: Option<Vec<String>>,
    quality: Option<u8>,
}

impl BatchConfigBuilder {
    /// Create a new builder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input root directory
    #[must_use]
    pub fn input_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.input_root = Some(path.into());
        self
    }

    /// Set the output root directory
    #[must_use]
    pub fn output_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_root = Some(path.into());
        self
    }

    /// Set the threshold policy
    #[must_use]
    pub fn policy(mut self, policy: ThresholdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the black threshold, keeping the policy's other fields
    #[must_use]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.policy.threshold = threshold;
        self
    }

    /// Enable or disable recursive discovery
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = Some(recursive);
        self
    }

    /// Set the file extensions to match
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Set the output quality (1-100)
    #[must_use]
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Build the configuration, validating parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `UnblackError::InvalidConfig` when the input root is missing,
    /// the extension list is empty, or the quality is out of range.
    pub fn build(self) -> Result<BatchConfig> {
        let input_root = self
            .input_root
            .ok_or_else(|| UnblackError::invalid_config("input root is required"))?;

        let quality = self.quality.unwrap_or(DEFAULT_QUALITY);
        if quality == 0 || quality > 100 {
            return Err(UnblackError::config_value_error("quality", quality, "1-100"));
        }

        let extensions = self
            .extensions
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect());
        if extensions.is_empty() {
            return Err(UnblackError::invalid_config(
                "at least one file extension is required",
            ));
        }

        Ok(BatchConfig {
            input_root,
            output_root: self.output_root,
            policy: self.policy,
            recursive: self.recursive.unwrap_or(true),
            extensions,
            quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BatchConfig::new("/tmp/images");
        assert_eq!(config.input_root, PathBuf::from("/tmp/images"));
        assert!(config.output_root.is_none());
        assert!(config.recursive);
        assert_eq!(config.extensions, vec![".jpg", ".jpeg"]);
        assert_eq!(config.policy.threshold, 30);
        assert_eq!(config.quality, 95);
    }

    #[test]
    fn test_builder_roundtrip() {
        let config = BatchConfig::builder()
            .input_root("/in")
            .output_root("/out")
            .threshold(12)
            .recursive(false)
            .extensions([".png"])
            .quality(80)
            .build()
            .unwrap();

        assert_eq!(config.input_root, PathBuf::from("/in"));
        assert_eq!(config.output_root, Some(PathBuf::from("/out")));
        assert_eq!(config.policy.threshold, 12);
        assert!(!config.recursive);
        assert_eq!(config.extensions, vec![".png"]);
        assert_eq!(config.quality, 80);
    }

    #[test]
    fn test_builder_requires_input_root() {
        let result = BatchConfig::builder().build();
        assert!(matches!(result, Err(UnblackError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_bad_quality() {
        for quality in [0, 101, 255] {
            let result = BatchConfig::builder()
                .input_root("/in")
                .quality(quality)
                .build();
            assert!(matches!(result, Err(UnblackError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_builder_rejects_empty_extensions() {
        let result = BatchConfig::builder()
            .input_root("/in")
            .extensions(Vec::<String>::new())
            .build();
        assert!(matches!(result, Err(UnblackError::InvalidConfig(_))));
    }
}
