//! Command-line interface for batch black-background removal

use super::config::CliConfigBuilder;
use crate::batch::{BatchResult, BatchRunner};
use crate::services::{ProgressReporter, TaskOutcome, TaskProgress};
use crate::tracing_config::init_cli_tracing;
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;

/// Batch black-background removal CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "unblack")]
pub struct Cli {
    /// Directory containing images to process
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory (defaults to a `processed` folder inside INPUT_DIR)
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Black threshold (0-255): pixels with all color channels at or below
    /// this value become transparent
    #[arg(short, long, default_value_t = 30)]
    pub threshold: u8,

    /// Output quality (1-100). Only meaningful for lossy formats; the
    /// lossless transparency-capable outputs ignore it.
    #[arg(short, long, default_value_t = 95)]
    pub quality: u8,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// File extensions to process
    #[arg(long, num_args = 1.., default_values_t = [".jpg".to_string(), ".jpeg".to_string()])]
    pub extensions: Vec<String>,

    /// Enable verbose logging (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Progress reporter that drives an indicatif bar from task notifications
///
/// The bar is created lazily on the first update, when the batch total is
/// first known.
struct IndicatifProgressReporter {
    bar: OnceLock<ProgressBar>,
}

impl IndicatifProgressReporter {
    fn new() -> Self {
        Self {
            bar: OnceLock::new(),
        }
    }

    fn bar_for(&self, total: usize) -> &ProgressBar {
        self.bar.get_or_init(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        })
    }
}

impl ProgressReporter for IndicatifProgressReporter {
    fn task_completed(&self, update: &TaskProgress) {
        let bar = self.bar_for(update.total);
        match update.outcome {
            TaskOutcome::Succeeded => {
                bar.set_message(format!("Processed {}", update.path.display()));
            },
            TaskOutcome::Failed => {
                bar.println(format!(
                    "Failed: {} ({})",
                    update.path.display(),
                    update.message.as_deref().unwrap_or("unknown error")
                ));
            },
        }
        bar.inc(1);
    }

    fn batch_finished(&self, result: &BatchResult) {
        if let Some(bar) = self.bar.get() {
            bar.finish_with_message(format!(
                "Completed! Succeeded: {}, Failed: {}",
                result.succeeded, result.failed
            ));
        }
    }
}

/// CLI entry point
///
/// A missing input root maps to a non-zero exit through the returned error.
/// A batch that completes with some per-file failures reports them and still
/// exits zero: failures are reported, not fatal.
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_cli_tracing(cli.verbose).context("Failed to initialize tracing")?;

    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;
    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    info!("Input directory: {}", config.input_root.display());
    info!(
        "Threshold: {}, recursive: {}, extensions: {}",
        config.policy.threshold,
        config.recursive,
        config.extensions.join(", ")
    );

    let runner = BatchRunner::new(config)
        .with_reporter(Box::new(IndicatifProgressReporter::new()));
    let output_root = runner.output_root();

    let start_time = Instant::now();
    let result = runner.run().context("Batch processing failed")?;
    let total_time = start_time.elapsed();

    if result.total == 0 {
        println!("No matching image files found in {}", cli.input_dir.display());
        return Ok(());
    }

    println!("\nProcessing complete in {:.2}s", total_time.as_secs_f64());
    println!("Total:     {}", result.total);
    println!("Succeeded: {}", result.succeeded);
    println!("Failed:    {}", result.failed);

    if result.succeeded > 0 {
        println!("Processed images saved to: {}", output_root.display());
    }
    if result.failed > 0 {
        warn!(
            "Some files failed to process. Succeeded: {}, Failed: {}",
            result.succeeded, result.failed
        );
    }

    Ok(())
}
