use miette::{miette, IntoDiagnostic, Result};
use recipes_migrations::{migrations_with_status, roll_back_to_version};

use super::{confirm_with_user, connect_using_arguments, run_in_async_runtime};
use crate::cli::DownCommandArguments;


pub fn cli_down(arguments: DownCommandArguments) -> Result<()> {
    run_in_async_runtime(cli_down_inner(arguments))
}


async fn cli_down_inner(arguments: DownCommandArguments) -> Result<()> {
    let mut database_connection = connect_using_arguments(&arguments.database).await?;

    let target_version = arguments.rollback_to_version;

    let migrations_to_roll_back = migrations_with_status(&mut database_connection)
        .await
        .into_diagnostic()?
        .into_iter()
        .filter(|migration| migration.is_applied() && migration.version > target_version)
        .collect::<Vec<_>>();

    println!();

    if migrations_to_roll_back.is_empty() {
        println!("No migrations to roll back: already at (or before) the specified version.");
        return Ok(());
    }

    println!(
        "Found {} migrations to roll back to reach version {}:",
        migrations_to_roll_back.len(),
        target_version
    );
    for migration in migrations_to_roll_back.iter().rev() {
        println!("  {:014} {}", migration.version, migration.description);
    }
    println!();

    if !arguments.skip_confirmation
        && !confirm_with_user(
            "Are you sure you want to continue? The migrations above will be rolled back.",
        )?
    {
        return Err(miette!("User aborted command."));
    }

    print!("Rolling back migrations...");

    roll_back_to_version(&mut database_connection, target_version)
        .await
        .into_diagnostic()?;

    println!("  [Done!]");

    Ok(())
}
