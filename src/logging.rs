//! Leveled diagnostics
//!
//! Sessions report through a [`LogSink`]. The default [`GlobalLogSink`]
//! forwards to the `log` facade, whose process-wide backend is installed
//! once with [`init_logging`] and is read-only afterwards.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Verbosity levels, `Error` being the least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    pub fn to_log_level(self) -> log::Level {
        match self {
            Level::Error => log::Level::Error,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        self.to_log_level().to_level_filter()
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => Level::Error,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown level name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Receiver of level-tagged diagnostics
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Forwards to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLogSink;

impl LogSink for GlobalLogSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: "shinefs", level.to_log_level(), "{}", message);
    }
}

/// Process-wide logger settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Append log lines to this file
    pub logfile: Option<PathBuf>,
    /// Most verbose level written
    pub max_level: Level,
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            logfile: None,
            max_level: Level::Error,
            to_stderr: true,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logfile<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.logfile = Some(path.into());
        self
    }

    pub fn max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    pub fn to_stderr(mut self, to_stderr: bool) -> Self {
        self.to_stderr = to_stderr;
        self
    }
}

/// Logger installation errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Cannot open log file: {0}")]
    Io(#[from] io::Error),

    #[error("A logger is already installed: {0}")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}

/// Writes every line to the log file and/or stderr
struct TeeWriter {
    file: Option<File>,
    stderr: bool,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        if self.stderr {
            io::stderr().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        if self.stderr {
            io::stderr().flush()?;
        }
        Ok(())
    }
}

/// Install the process-wide logger
///
/// Can succeed only once per process; later calls return
/// [`LoggingError::AlreadyInitialised`].
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let file = match &config.logfile {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    env_logger::Builder::new()
        .filter_level(config.max_level.to_level_filter())
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(TeeWriter {
            file,
            stderr: config.to_stderr,
        })))
        .try_init()?;

    log::debug!(
        "logging initialised: level {}, file {:?}, stderr {}",
        config.max_level,
        config.logfile,
        config.to_stderr
    );
    Ok(())
}
