use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::traits::TryResolve;
use crate::utilities::make_path_absolute;
use crate::{LoggingConfigurationError, MissingLoggingDirectoryCreationError};


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    log_file_output_directory: String,
}

impl UnresolvedLoggingConfiguration {
    pub(crate) fn with_base_directory(self, base_directory: &Path) -> UnresolvedLoggingConfigurationWithBase {
        UnresolvedLoggingConfigurationWithBase {
            inner: self,
            base_directory: base_directory.to_path_buf(),
        }
    }
}

/// Logging configuration paired with the directory relative log paths are resolved against.
pub(crate) struct UnresolvedLoggingConfigurationWithBase {
    inner: UnresolvedLoggingConfiguration,
    base_directory: PathBuf,
}


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}


impl TryResolve for UnresolvedLoggingConfigurationWithBase {
    type Resolved = LoggingConfiguration;
    type Error = LoggingConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let UnresolvedLoggingConfigurationWithBase {
            inner,
            base_directory,
        } = self;

        // Validate the file and console level filters.
        if let Err(error) = EnvFilter::try_new(&inner.console_output_level_filter) {
            return Err(LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: inner.console_output_level_filter,
                kind: "console_output_level_filter".into(),
                error,
            });
        }

        if let Err(error) = EnvFilter::try_new(&inner.log_file_output_level_filter) {
            return Err(LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: inner.log_file_output_level_filter,
                kind: "log_file_output_level_filter".into(),
                error,
            });
        }

        let log_file_output_directory =
            make_path_absolute(&base_directory, &inner.log_file_output_directory);

        Ok(LoggingConfiguration {
            console_output_level_filter: inner.console_output_level_filter,
            log_file_output_level_filter: inner.log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}


impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> EnvFilter {
        // PANIC SAFETY: The filter was validated in `try_resolve`.
        EnvFilter::try_new(&self.console_output_level_filter).unwrap()
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        // PANIC SAFETY: The filter was validated in `try_resolve`.
        EnvFilter::try_new(&self.log_file_output_level_filter).unwrap()
    }

    pub fn create_log_file_output_directory_if_missing(
        &self,
    ) -> Result<(), MissingLoggingDirectoryCreationError> {
        if self.log_file_output_directory.exists() && !self.log_file_output_directory.is_dir() {
            return Err(MissingLoggingDirectoryCreationError::NotADirectory {
                path: self.log_file_output_directory.clone(),
            });
        }

        std::fs::create_dir_all(&self.log_file_output_directory).map_err(|error| {
            MissingLoggingDirectoryCreationError::UnableToCreateDirectory {
                directory_path: self.log_file_output_directory.clone(),
                error,
            }
        })
    }
}
