//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::{BatchConfig, BatchConfigBuilder};
use anyhow::{Context, Result};

/// Convert CLI arguments to a `BatchConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build a `BatchConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<BatchConfig> {
        let mut builder = BatchConfigBuilder::new()
            .input_root(&cli.input_dir)
            .threshold(cli.threshold)
            .quality(cli.quality)
            .recursive(!cli.no_recursive)
            .extensions(cli.extensions.clone());

        if let Some(output) = &cli.output {
            builder = builder.output_root(output);
        }

        builder.build().context("Invalid configuration")
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.quality == 0 || cli.quality > 100 {
            anyhow::bail!("Invalid quality: {} (valid range: 1-100)", cli.quality);
        }
        if cli.extensions.is_empty() {
            anyhow::bail!("At least one file extension is required");
        }
        Ok(())
    }
}
