//! Logger setup for the command-line tool

use crate::io::configuration::{DEFAULT_LOG_LEVEL, LOG_FILES_KEPT, LOG_ROTATION_BYTES};
use crate::io::error::Result;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use std::path::PathBuf;

/// Where and how verbosely to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Level specification, e.g. `info` or `lesionmap=debug`
    pub level: String,
    /// Directory for rotated log files; stderr only when absent
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

impl LogSettings {
    /// Configure a logger without starting it
    ///
    /// # Errors
    ///
    /// Returns an error if the level specification cannot be parsed
    pub fn build(&self) -> Result<Logger> {
        let logger = Logger::try_with_str(&self.level)?;

        let logger = match &self.directory {
            Some(directory) => logger
                .log_to_file(FileSpec::default().directory(directory))
                .duplicate_to_stderr(Duplicate::All)
                .rotate(
                    Criterion::Size(LOG_ROTATION_BYTES),
                    Naming::Timestamps,
                    Cleanup::KeepLogFiles(LOG_FILES_KEPT),
                ),
            None => logger.log_to_stderr(),
        };

        Ok(logger)
    }

    /// Install the global logger
    ///
    /// The returned handle must be kept alive for as long as logging is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the specification is invalid, a logger is already installed,
    /// or the log directory cannot be used
    pub fn start(&self) -> Result<LoggerHandle> {
        Ok(self.build()?.start()?)
    }
}
