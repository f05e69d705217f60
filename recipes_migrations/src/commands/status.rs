use miette::{IntoDiagnostic, Result};
use recipes_migrations::migrations_with_status;

use super::{connect_using_arguments, run_in_async_runtime};
use crate::cli::StatusCommandArguments;


pub fn cli_status(arguments: StatusCommandArguments) -> Result<()> {
    run_in_async_runtime(cli_status_inner(arguments))
}


async fn cli_status_inner(arguments: StatusCommandArguments) -> Result<()> {
    let mut database_connection = connect_using_arguments(&arguments.database).await?;

    let migrations = migrations_with_status(&mut database_connection)
        .await
        .into_diagnostic()?;

    println!();

    if migrations.is_empty() {
        println!("No migrations available.");
        return Ok(());
    }

    for migration in &migrations {
        println!(
            "  [{}] {:014} {}",
            if migration.is_applied() {
                "applied"
            } else {
                "pending"
            },
            migration.version,
            migration.description
        );
    }

    println!();
    println!(
        "{} of {} migrations applied.",
        migrations
            .iter()
            .filter(|migration| migration.is_applied())
            .count(),
        migrations.len()
    );

    Ok(())
}
