//! Service layer separating I/O and presentation concerns from the core
//!
//! The transform engine and batch orchestrator delegate codec work, output
//! format policy and progress reporting to these services so the core stays
//! pure and testable.

mod format;
mod io;
mod progress;

pub use format::OutputFormatHandler;
pub use io::ImageIoService;
pub use progress::{
    ConsoleProgressReporter, NoOpProgressReporter, ProgressReporter, TaskOutcome, TaskProgress,
};
