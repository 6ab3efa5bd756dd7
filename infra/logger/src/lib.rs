//! # Logger
//!
//! Installs the global `tracing` subscriber for the command-line tools.
//!
//! Console output is compact and goes to stderr so that stdout stays free for program
//! output. A daily rolling file layer can be added with [`LoggerBuilder::directory`].
//! `RUST_LOG` overrides the configured level.
//!
//! ## Example
//!
//! ```rust
//! use mgkit_logger::Logger;
//!
//! let _logger = Logger::builder().name("add-minigame").verbosity(1).init().unwrap();
//! tracing::info!("ready");
//! ```

mod builder;
mod error;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use tracing_appender::non_blocking::WorkerGuard;

/// Keeps the file writer alive. Pending file logs are flushed when this is dropped.
#[must_use = "Dropping this handle stops the background file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) const fn new(guard: Option<WorkerGuard>) -> Self {
        Self { guard }
    }

    /// Whether a file layer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}
