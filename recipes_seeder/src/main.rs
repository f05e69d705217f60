//! Fills the database with sample users, categories and recipes.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use miette::{Context, IntoDiagnostic, Result};
use recipes_auth::ArgonHasher;
use recipes_configuration::{Configuration, DatabaseConfiguration};
use recipes_database::fixtures::AppFixtures;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::info;


#[derive(Parser)]
#[command(
    name = "recipes_seeder",
    author,
    about = "Loads sample data (fixtures) into the recipes database.",
    version
)]
struct CliArgs {
    #[arg(
        short = 'c',
        long = "configurationFilePath",
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "append",
        action = ArgAction::SetTrue,
        help = "Load fixtures without purging existing data first."
    )]
    append: bool,
}


fn connect_options(database_configuration: &DatabaseConfiguration) -> PgConnectOptions {
    let mut connection_options = PgConnectOptions::new_without_pgpass()
        .application_name(&format!(
            "recipes-seeder_v{}",
            env!("CARGO_PKG_VERSION")
        ))
        .host(&database_configuration.host)
        .port(database_configuration.port)
        .username(&database_configuration.username)
        .database(&database_configuration.database_name);

    if let Some(password) = &database_configuration.password {
        connection_options = connection_options.password(password.as_str());
    }

    connection_options
}


#[tokio::main]
async fn main() -> Result<()> {
    let arguments = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;

    let hasher = ArgonHasher::new(&configuration.secrets.hash_salt)
        .into_diagnostic()
        .wrap_err("Failed to initialize password hasher.")?;

    let mut database_connection =
        PgConnection::connect_with(&connect_options(&configuration.database))
            .await
            .into_diagnostic()
            .wrap_err("Failed to connect to the database.")?;

    let mut transaction = database_connection
        .begin()
        .await
        .into_diagnostic()
        .wrap_err("Failed to begin transaction.")?;

    if !arguments.append {
        AppFixtures::purge(&mut transaction)
            .await
            .into_diagnostic()
            .wrap_err("Failed to purge the database.")?;
    }

    let loaded = AppFixtures::load(&mut transaction, &hasher)
        .await
        .into_diagnostic()
        .wrap_err("Failed to load fixtures.")?;

    transaction
        .commit()
        .await
        .into_diagnostic()
        .wrap_err("Failed to commit transaction.")?;

    info!(
        users = loaded.users,
        categories = loaded.categories,
        recipes = loaded.recipes,
        "Database seeded."
    );

    Ok(())
}
