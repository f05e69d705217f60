use std::env::current_dir;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod database;
mod http;
mod json_web_token;
mod logging;
mod pagination;
mod secrets;

pub use database::*;
pub use http::*;
pub use json_web_token::*;
pub use logging::*;
pub use pagination::*;
pub use secrets::*;

use crate::traits::{Resolve, TryResolve};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Configuration related to the HTTP server.
    http: UnresolvedHttpConfiguration,

    /// Configuration related to the database.
    database: UnresolvedDatabaseConfiguration,

    /// Password-related configuration.
    secrets: UnresolvedSecretsConfiguration,

    /// Json Web Token-related configuration.
    json_web_token: UnresolvedJsonWebTokenConfiguration,

    /// Listing-related configuration.
    #[serde(default)]
    pagination: UnresolvedPaginationConfiguration,
}


/// The entire recipes backend configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Configuration related to the HTTP server.
    pub http: HttpConfiguration,

    /// Configuration related to the database.
    pub database: DatabaseConfiguration,

    /// Password-related configuration.
    pub secrets: SecretsConfiguration,

    /// Json Web Token-related configuration.
    pub json_web_token: JsonWebTokenConfiguration,

    /// Listing-related configuration.
    pub pagination: PaginationConfiguration,
}


impl UnresolvedConfiguration {
    fn try_resolve(
        self,
        configuration_file_path: PathBuf,
        base_directory: &Path,
    ) -> Result<Configuration, ConfigurationResolutionError> {
        let logging = self
            .logging
            .with_base_directory(base_directory)
            .try_resolve()?;
        let http = self.http.resolve();
        let database = self.database.resolve();
        let secrets = self.secrets.resolve();
        let json_web_token = self.json_web_token.resolve();
        let pagination = self.pagination.try_resolve()?;

        Ok(Configuration {
            configuration_file_path,
            logging,
            http,
            database,
            secrets,
            json_web_token,
            pagination,
        })
    }
}


impl Configuration {
    /// Parse and resolve a configuration from its TOML contents.
    ///
    /// `configuration_file_path` is only recorded, not read. Relative paths inside
    /// the configuration are resolved against `base_directory`.
    pub fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
        base_directory: &Path,
    ) -> Result<Self, ConfigurationLoadingError> {
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .map_err(|error| ConfigurationLoadingError::ParsingError { error })?;

        Ok(unresolved_configuration.try_resolve(configuration_file_path, base_directory)?)
    }

    /// Load the configuration from a specific file path.
    ///
    /// Relative paths inside the configuration are resolved against the current directory.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        let configuration_file_path = configuration_file_path.as_ref();

        // Read the configuration file into memory as a string.
        let configuration_string = fs::read_to_string(configuration_file_path).map_err(|error| {
            ConfigurationLoadingError::UnableToReadConfigurationFile {
                path: configuration_file_path.to_path_buf(),
                error,
            }
        })?;

        let base_directory = current_dir()
            .map_err(|error| ConfigurationLoadingError::UnableToDetermineDefaultPath { error })?;

        Self::load_from_str(
            &configuration_string,
            configuration_file_path.to_path_buf(),
            &base_directory,
        )
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        let default_path = get_default_configuration_file_path()
            .map_err(|error| ConfigurationLoadingError::UnableToDetermineDefaultPath { error })?;

        Configuration::load_from_path(default_path)
    }
}



#[cfg(test)]
mod test {
    use super::*;
    use crate::PaginationConfigurationError;

    const SAMPLE_CONFIGURATION: &str = r#"
        [logging]
        console_output_level_filter = "info"
        log_file_output_level_filter = "debug,sqlx=warn"
        log_file_output_directory = "data/logs"

        [http]
        host = "127.0.0.1"
        port = 8866

        [database]
        host = "127.0.0.1"
        port = 5432
        username = "recipes"
        password = "recipes"
        database_name = "recipes"

        [secrets]
        hash_salt = "c29tZXNhbHRzb21lc2FsdA"

        [json_web_token]
        secret = "some-secret"
    "#;

    fn parse(contents: &str) -> Result<Configuration, ConfigurationLoadingError> {
        Configuration::load_from_str(
            contents,
            PathBuf::from("/nonexistent-recipes-directory/data/configuration.toml"),
            Path::new("/nonexistent-recipes-directory"),
        )
    }

    #[test]
    fn parses_sample_configuration() {
        let configuration = parse(SAMPLE_CONFIGURATION).unwrap();

        assert_eq!(configuration.http.host, "127.0.0.1");
        assert_eq!(configuration.http.port, 8866);
        assert_eq!(configuration.database.password.as_deref(), Some("recipes"));
        assert_eq!(configuration.database.statement_cache_capacity, None);
        assert_eq!(configuration.json_web_token.secret, "some-secret");
        assert_eq!(
            configuration.logging.log_file_output_directory,
            PathBuf::from("/nonexistent-recipes-directory/data/logs")
        );
        assert_eq!(
            configuration.pagination.items_per_page,
            DEFAULT_ITEMS_PER_PAGE
        );
    }

    #[test]
    fn reads_explicit_page_size() {
        let contents = format!("{}\n[pagination]\nitems_per_page = 25\n", SAMPLE_CONFIGURATION);

        let configuration = parse(&contents).unwrap();
        assert_eq!(configuration.pagination.items_per_page, 25);
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let contents = format!("{}\n[pagination]\nitems_per_page = 0\n", SAMPLE_CONFIGURATION);

        let error = parse(&contents).unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::PaginationConfigurationError {
                    error: PaginationConfigurationError::ItemsPerPageOutOfRange { value: 0, .. }
                }
            }
        ));
    }

    #[test]
    fn rejects_invalid_tracing_filter() {
        let contents = SAMPLE_CONFIGURATION.replace(
            r#"console_output_level_filter = "info""#,
            r#"console_output_level_filter = "info,recipes=definitely_not_a_level""#,
        );

        let error = parse(&contents).unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::LoggingConfigurationError { .. }
            }
        ));
    }

    #[test]
    fn rejects_missing_tables() {
        let error = parse("[http]\nhost = \"127.0.0.1\"\nport = 8866\n").unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ParsingError { .. }
        ));
    }
}
