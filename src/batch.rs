//! Batch orchestration: discovery, path mirroring and per-file accounting
//!
//! Applies the transform engine across every eligible file under an input
//! root, mirroring the directory structure into an output root. Individual
//! file failures are recorded and never abort the run; the only fatal
//! condition is a missing input root.

use crate::config::{BatchConfig, DEFAULT_OUTPUT_SUBDIR};
use crate::error::{Result, UnblackError};
use crate::services::{
    ImageIoService, NoOpProgressReporter, OutputFormatHandler, ProgressReporter, TaskOutcome,
    TaskProgress,
};
use crate::transform;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Aggregate outcome of one batch run
///
/// Invariant: `total == succeeded + failed`. After a cancelled run `total`
/// counts only the tasks actually attempted, not the full discovery count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of file tasks attempted
    pub total: usize,
    /// Number of tasks that decoded, transformed and wrote successfully
    pub succeeded: usize,
    /// Number of tasks that failed at any step
    pub failed: usize,
}

impl BatchResult {
    /// Fold one task outcome into the aggregate
    #[must_use]
    fn record(self, outcome: TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Succeeded => Self {
                total: self.total + 1,
                succeeded: self.succeeded + 1,
                failed: self.failed,
            },
            TaskOutcome::Failed => Self {
                total: self.total + 1,
                succeeded: self.succeeded,
                failed: self.failed + 1,
            },
        }
    }
}

/// One unit of batch work: an input file and its mirrored output path
///
/// Created during enumeration, consumed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// Path of the discovered input file
    pub input: PathBuf,
    /// Mirrored, format-safe output path
    pub output: PathBuf,
}

/// Cooperative cancellation handle for a batch run
///
/// The orchestrator checks the token once before each file task, never
/// mid-write, so no partial file is left behind. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a new, unsignalled token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation; the run stops before the next task begins
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been signalled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Discover input files under `input_root` whose extension matches
///
/// Extension matching is case-insensitive and tolerates entries with or
/// without a leading dot. Results are sorted so the processing order is
/// stable within one run.
///
/// # Errors
///
/// Returns `UnblackError::InvalidInputRoot` when `input_root` does not exist,
/// and `UnblackError::Io` when directory entries cannot be read.
pub fn discover(input_root: &Path, extensions: &[String], recursive: bool) -> Result<Vec<PathBuf>> {
    if !input_root.is_dir() {
        return Err(UnblackError::invalid_input_root(input_root));
    }

    let mut files = Vec::new();

    if recursive {
        for entry in walkdir::WalkDir::new(input_root) {
            let entry = entry.map_err(|e| {
                UnblackError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("failed to walk '{}': {e}", input_root.display()),
                ))
            })?;
            if entry.file_type().is_file() && matches_extension(entry.path(), extensions) {
                files.push(entry.path().to_path_buf());
            }
        }
    } else {
        for entry in std::fs::read_dir(input_root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() && matches_extension(&entry.path(), extensions) {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a file's extension matches any configured extension
fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    let ext = ext.to_lowercase();
    extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .any(|e| e == ext)
}

/// Re-root `input_path` from `input_root` into `output_root`
///
/// Preserves every intermediate subdirectory segment, so the output tree's
/// shape exactly matches the processed subset of the input tree.
///
/// # Errors
///
/// Returns `UnblackError::InvalidConfig` when `input_path` does not live
/// under `input_root`.
pub fn mirror_path(input_root: &Path, input_path: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = input_path.strip_prefix(input_root).map_err(|_| {
        UnblackError::invalid_config(format!(
            "input path '{}' is not under input root '{}'",
            input_path.display(),
            input_root.display()
        ))
    })?;
    Ok(output_root.join(relative))
}

/// Decode one file, transform it and encode the result
///
/// The caller is expected to treat any error from this boundary as a
/// per-task failure; nothing here aborts the batch.
pub fn process_one(task: &FileTask, config: &BatchConfig) -> Result<()> {
    let image = ImageIoService::load_image(&task.input)?;
    let transformed = transform::remove_background(&image, config.policy);
    ImageIoService::save_image(&transformed, &task.output)
}

/// Sequential batch runner over one input tree
///
/// ```rust,no_run
/// use unblack::{BatchConfig, BatchRunner};
///
/// # fn example() -> unblack::Result<()> {
/// let config = BatchConfig::new("photos/");
/// let result = BatchRunner::new(config).run()?;
/// println!("{} of {} images processed", result.succeeded, result.total);
/// # Ok(())
/// # }
/// ```
pub struct BatchRunner {
    config: BatchConfig,
    reporter: Box<dyn ProgressReporter>,
    cancel: CancellationToken,
}

impl BatchRunner {
    /// Create a runner with a no-op reporter and a fresh cancellation token
    #[must_use]
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            reporter: Box::new(NoOpProgressReporter),
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a progress reporter invoked after each completed task
    #[must_use]
    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Attach an externally-owned cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A clone of the runner's cancellation token, for handing to another
    /// execution context
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The resolved output root for this configuration
    #[must_use]
    pub fn output_root(&self) -> PathBuf {
        self.config.output_root.clone().unwrap_or_else(|| {
            self.config.input_root.join(DEFAULT_OUTPUT_SUBDIR)
        })
    }

    /// Run the batch to completion
    ///
    /// Discovers inputs, mirrors each path under the output root, processes
    /// every file sequentially and folds the outcomes into a [`BatchResult`].
    /// Per-file failures are counted, logged and reported, never propagated.
    /// When zero files match, returns a zero result without touching the
    /// filesystem. After cancellation the result covers only attempted tasks.
    ///
    /// # Errors
    ///
    /// Returns `UnblackError::InvalidInputRoot` when the input root does not
    /// exist; all other errors surface through the `failed` counter.
    pub fn run(&self) -> Result<BatchResult> {
        let files = discover(
            &self.config.input_root,
            &self.config.extensions,
            self.config.recursive,
        )?;

        if files.is_empty() {
            log::info!(
                "No matching image files found under {}",
                self.config.input_root.display()
            );
            return Ok(BatchResult::default());
        }

        // Discovery happens before the output root exists, so the output
        // tree is never re-discovered as input.
        let output_root = self.output_root();
        let total = files.len();
        tracing::info!(total, output_root = %output_root.display(), "starting batch");

        let mut result = BatchResult::default();
        for input in &files {
            if self.cancel.is_cancelled() {
                log::info!(
                    "Cancellation requested; stopping after {} of {} tasks",
                    result.total,
                    total
                );
                break;
            }

            let (outcome, message) = match self.run_task(input, &output_root) {
                Ok(()) => (TaskOutcome::Succeeded, None),
                Err(e) => {
                    log::error!("Failed to process {}: {e}", input.display());
                    (TaskOutcome::Failed, Some(e.to_string()))
                },
            };

            result = result.record(outcome);
            self.reporter.task_completed(&TaskProgress {
                index: result.total,
                total,
                path: input.clone(),
                outcome,
                message,
            });
        }

        self.reporter.batch_finished(&result);
        debug_assert_eq!(result.total, result.succeeded + result.failed);
        Ok(result)
    }

    /// Build and process the file task for one discovered input
    fn run_task(&self, input: &Path, output_root: &Path) -> Result<()> {
        let mirrored = mirror_path(&self.config.input_root, input, output_root)?;
        let task = FileTask {
            input: input.to_path_buf(),
            output: OutputFormatHandler::ensure_transparency_capable(&mirrored),
        };
        process_one(&task, &self.config)
    }
}

/// Run a batch with the default reporter and no cancellation
///
/// # Errors
///
/// See [`BatchRunner::run`].
pub fn run_batch(config: BatchConfig) -> Result<BatchResult> {
    BatchRunner::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_result_fold() {
        let result = BatchResult::default()
            .record(TaskOutcome::Succeeded)
            .record(TaskOutcome::Failed)
            .record(TaskOutcome::Succeeded);

        assert_eq!(
            result,
            BatchResult {
                total: 3,
                succeeded: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn test_matches_extension_case_insensitive() {
        let extensions = vec![".jpg".to_string(), ".jpeg".to_string()];

        assert!(matches_extension(Path::new("a/image.jpg"), &extensions));
        assert!(matches_extension(Path::new("a/image.JPG"), &extensions));
        assert!(matches_extension(Path::new("a/image.Jpeg"), &extensions));
        assert!(!matches_extension(Path::new("a/image.png"), &extensions));
        assert!(!matches_extension(Path::new("a/no_extension"), &extensions));
    }

    #[test]
    fn test_matches_extension_without_leading_dot() {
        let extensions = vec!["jpg".to_string()];
        assert!(matches_extension(Path::new("x.jpg"), &extensions));
        assert!(matches_extension(Path::new("x.JPG"), &extensions));
    }

    #[test]
    fn test_mirror_path_preserves_structure() {
        let out = mirror_path(
            Path::new("/in"),
            Path::new("/in/a/b/x.jpg"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/out/a/b/x.jpg"));
    }

    #[test]
    fn test_mirror_path_rejects_foreign_input() {
        let result = mirror_path(
            Path::new("/in"),
            Path::new("/elsewhere/x.jpg"),
            Path::new("/out"),
        );
        assert!(matches!(result, Err(UnblackError::InvalidConfig(_))));
    }

    #[test]
    fn test_discover_missing_root() {
        let result = discover(
            Path::new("/this/root/does/not/exist"),
            &[".jpg".to_string()],
            true,
        );
        assert!(matches!(result, Err(UnblackError::InvalidInputRoot(_))));
    }

    #[test]
    fn test_cancellation_token_shared_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }
}
