use std::borrow::Cow;
use std::env::{self, VarError};
use std::future::Future;
use std::io::{self, Write};

use miette::{miette, Context, IntoDiagnostic, Result};
use recipes_migrations::connect_to_database;
use sqlx::PgConnection;

use crate::cli::DatabaseArguments;

pub(crate) mod down;
pub(crate) mod status;
pub(crate) mod up;


pub(crate) fn get_database_url_with_env_fallback<'a, S>(
    optional_database_url: Option<&'a S>,
    fallback_environment_variable_name: &str,
) -> Result<Option<Cow<'a, str>>>
where
    S: AsRef<str>,
{
    if let Some(database_url_override) = optional_database_url {
        return Ok(Some(Cow::from(database_url_override.as_ref())));
    }

    match env::var(fallback_environment_variable_name) {
        Ok(database_url_from_env) => Ok(Some(Cow::from(database_url_from_env))),
        Err(error) => match error {
            VarError::NotPresent => Ok(None),
            VarError::NotUnicode(_) => Err(miette!(
                "the {} environment variable is not valid Unicode",
                fallback_environment_variable_name
            )),
        },
    }
}


pub(crate) async fn connect_using_arguments(arguments: &DatabaseArguments) -> Result<PgConnection> {
    let database_url =
        get_database_url_with_env_fallback(arguments.database_url.as_ref(), "DATABASE_URL")?
            .ok_or_else(|| {
                miette!(
                    "either the --database-url argument or the DATABASE_URL \
                    environment variable must be specified"
                )
            })?;

    print!("Connecting to the PostgreSQL database...");

    let database_connection = connect_to_database(database_url.as_ref())
        .await
        .into_diagnostic()?;

    println!("  [Connected!]");

    Ok(database_connection)
}


/// Asks the user a yes/no question on the terminal, defaulting to no.
pub(crate) fn confirm_with_user(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout()
        .flush()
        .into_diagnostic()
        .wrap_err("failed to flush terminal output")?;

    let mut user_response = String::new();
    io::stdin()
        .read_line(&mut user_response)
        .into_diagnostic()
        .wrap_err("failed to read user terminal input")?;

    Ok(user_response.trim_end().eq_ignore_ascii_case("y"))
}


pub(crate) fn run_in_async_runtime<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let async_runtime = tokio::runtime::Runtime::new()
        .into_diagnostic()
        .wrap_err("failed to initialize tokio async runtime")?;

    async_runtime
        .block_on(future)
        .wrap_err("failed to run root async task to completion")
}
