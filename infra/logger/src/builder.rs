use crate::Logger;
use crate::error::{LoggerError, LoggerErrorExt};
use private::Sealed;
use std::fs;
use std::io::IsTerminal;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
pub(crate) struct LoggerConfig {
    pub(crate) console: bool,
    pub(crate) directory: Option<PathBuf>,
    pub(crate) level: LevelFilter,
    pub(crate) max_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::WARN,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Configures the global subscriber. A name is required before [`LoggerBuilder::init`]
/// becomes available; file-only options appear once a directory is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    pub(crate) config: LoggerConfig,
    name: N,
    file_state: PhantomData<F>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self { config: LoggerConfig::default(), name: NoName, file_state: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the logger; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { name: WithName(name.into()), config: self.config, file_state: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Number of daily files kept in the log directory.
    #[must_use = "the builder does nothing until `init` is called"]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    #[must_use = "the builder does nothing until `init` is called"]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Maps a `-v` count to a level: none is `WARN`, one `INFO`, two `DEBUG`, more `TRACE`.
    #[must_use = "the builder does nothing until `init` is called"]
    pub const fn verbosity(self, count: u8) -> Self {
        let level = match count {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        self.level(level)
    }

    /// Console output always goes to stderr.
    #[must_use = "the builder does nothing until `init` is called"]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Adds a daily rolling file layer writing into `directory`.
    pub fn directory(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.directory = Some(directory.into());
        LoggerBuilder { config, name: self.name, file_state: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// `RUST_LOG` directives take precedence over the configured level.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] when the name is blank, `max_files` is zero or
    /// no layer is enabled; [`LoggerError::Subscriber`] when a subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        if name.trim().is_empty() {
            return Err(LoggerError::invalid("Logger name cannot be empty"));
        }
        if self.config.max_files == 0 {
            return Err(LoggerError::invalid("max_files must be greater than zero"));
        }
        if !self.config.console && self.config.directory.is_none() {
            return Err(LoggerError::invalid("Enable console output or set a log directory"));
        }

        let filter =
            EnvFilter::builder().with_default_directive(self.config.level.into()).from_env_lossy();
        let mut layers = Vec::new();

        if self.config.console {
            let ansi = std::io::stderr().is_terminal();
            let console = layer()
                .compact()
                .without_time()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(std::io::stderr);
            layers.push(console.boxed());
        }

        let guard = match self.config.directory {
            Some(directory) => {
                fs::create_dir_all(&directory)
                    .context(format!("creating log directory {}", directory.display()))?;
                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.config.max_files)
                    .build(&directory)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                layers.push(layer().with_writer(writer).with_ansi(false).boxed());
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, "Logging initialized");

        Ok(Logger::new(guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = LoggerBuilder::new().name("add-minigame");
        assert!(builder.config.console);
        assert_eq!(builder.config.level, LevelFilter::WARN);
        assert!(builder.config.directory.is_none());
    }

    #[test]
    fn test_verbosity_levels() {
        let level = |count| LoggerBuilder::new().name("x").verbosity(count).config.level;
        assert_eq!(level(0), LevelFilter::WARN);
        assert_eq!(level(1), LevelFilter::INFO);
        assert_eq!(level(2), LevelFilter::DEBUG);
        assert_eq!(level(9), LevelFilter::TRACE);
    }

    #[test]
    fn test_file_options() {
        let builder = LoggerBuilder::new().name("x").directory("logs").max_files(2);
        assert_eq!(builder.config.max_files, 2);
        assert_eq!(builder.config.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_rejects_invalid_settings_before_installing() {
        let blank = LoggerBuilder::new().name("  ").init().unwrap_err();
        assert!(blank.to_string().contains("Logger name cannot be empty"));

        let silent = LoggerBuilder::new().name("x").console(false).init().unwrap_err();
        assert!(matches!(silent, LoggerError::InvalidConfiguration { .. }));

        let zero = LoggerBuilder::new().name("x").directory("unused").max_files(0).init().unwrap_err();
        assert!(zero.to_string().contains("max_files"));
    }
}
