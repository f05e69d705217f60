//! Command-line interface definitions for the server binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};


/// Server command-line arguments.
#[derive(Parser)]
#[command(
    name = "recipes",
    author,
    about = "API server for managing recipes and their categories.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configurationFilePath",
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "apply-pending-migrations",
        action = ArgAction::SetTrue,
        help = "On startup, apply any pending database migrations."
    )]
    pub apply_pending_migrations: bool,
}


#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        CLIArgs::command().debug_assert();
    }

    #[test]
    fn parses_configuration_path_and_migration_flag() {
        let arguments = CLIArgs::parse_from([
            "recipes",
            "-c",
            "./custom/configuration.toml",
            "--apply-pending-migrations",
        ]);

        assert_eq!(
            arguments.configuration_file_path,
            Some(PathBuf::from("./custom/configuration.toml"))
        );
        assert!(arguments.apply_pending_migrations);

        let arguments = CLIArgs::parse_from(["recipes"]);
        assert!(arguments.configuration_file_path.is_none());
        assert!(!arguments.apply_pending_migrations);
    }
}
