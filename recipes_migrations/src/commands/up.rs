use miette::{miette, IntoDiagnostic, Result};
use recipes_migrations::{apply_pending_migrations, migrations_with_status};

use super::{confirm_with_user, connect_using_arguments, run_in_async_runtime};
use crate::cli::UpCommandArguments;


pub fn cli_up(arguments: UpCommandArguments) -> Result<()> {
    run_in_async_runtime(cli_up_inner(arguments))
}


async fn cli_up_inner(arguments: UpCommandArguments) -> Result<()> {
    let mut database_connection = connect_using_arguments(&arguments.database).await?;

    let migrations_to_apply = migrations_with_status(&mut database_connection)
        .await
        .into_diagnostic()?
        .into_iter()
        .filter(|migration| !migration.is_applied())
        .collect::<Vec<_>>();

    println!();

    if migrations_to_apply.is_empty() {
        println!("No migrations to apply: the database is up to date.");
        return Ok(());
    }

    println!(
        "Found {} migrations to apply:",
        migrations_to_apply.len()
    );
    for migration in &migrations_to_apply {
        println!("  {:014} {}", migration.version, migration.description);
    }
    println!();

    if !arguments.skip_confirmation
        && !confirm_with_user("Are you sure you want to continue? The migrations above will be applied.")?
    {
        return Err(miette!("User aborted command."));
    }

    print!("Applying migrations...");

    apply_pending_migrations(&mut database_connection)
        .await
        .into_diagnostic()?;

    println!("  [Done!]");

    Ok(())
}
