//! Progress reporting for batch runs
//!
//! The orchestrator pushes one notification per completed file task through
//! the [`ProgressReporter`] trait. Front-ends (CLI progress bar, a windowed
//! shell, tests) implement the trait; the core never manages threads or
//! renders anything itself.

use crate::batch::BatchResult;
use std::path::PathBuf;

/// Outcome of one file task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The file was decoded, transformed and written
    Succeeded,
    /// A decode, transform or write step failed; the batch continued
    Failed,
}

/// Notification payload sent after each completed file task
#[derive(Debug, Clone)]
pub struct TaskProgress {
    /// 1-based count of tasks attempted so far, suitable for driving a
    /// progress bar directly against `total`
    pub index: usize,
    /// Number of discovered tasks in this run
    pub total: usize,
    /// Input path of the completed task
    pub path: PathBuf,
    /// Whether the task succeeded or failed
    pub outcome: TaskOutcome,
    /// Human-readable error description for failed tasks
    pub message: Option<String>,
}

/// Trait for receiving per-task progress notifications
pub trait ProgressReporter: Send + Sync {
    /// Called after each file task completes, successfully or not
    fn task_completed(&self, update: &TaskProgress);

    /// Called once after the batch finishes (including after cancellation)
    fn batch_finished(&self, result: &BatchResult) {
        let _ = result;
    }
}

/// No-op progress reporter that discards all notifications
pub struct NoOpProgressReporter;

impl ProgressReporter for NoOpProgressReporter {
    fn task_completed(&self, _update: &TaskProgress) {}
}

/// Progress reporter that logs each task through the `log` facade
pub struct ConsoleProgressReporter;

impl ProgressReporter for ConsoleProgressReporter {
    fn task_completed(&self, update: &TaskProgress) {
        match update.outcome {
            TaskOutcome::Succeeded => log::info!(
                "[{}/{}] processed {}",
                update.index,
                update.total,
                update.path.display()
            ),
            TaskOutcome::Failed => log::error!(
                "[{}/{}] failed {}: {}",
                update.index,
                update.total,
                update.path.display(),
                update.message.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    fn batch_finished(&self, result: &BatchResult) {
        log::info!(
            "Batch finished: {} total, {} succeeded, {} failed",
            result.total,
            result.succeeded,
            result.failed
        );
    }
}
