use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "recipes_migrations",
    author,
    about = "Recipes database migrations CLI.",
    version
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}



#[derive(Subcommand)]
pub enum CliCommand {
    #[command(name = "up", about = "Applies all pending migrations.")]
    Up(UpCommandArguments),

    #[command(
        name = "down",
        about = "Rolls back applied migrations to revert the database to the specified schema version. \
                Note that in general, this is a destructive action."
    )]
    Down(DownCommandArguments),

    #[command(
        name = "status",
        about = "Displays all migrations and whether they have been applied."
    )]
    Status(StatusCommandArguments),
}


#[derive(Args)]
pub struct DatabaseArguments {
    #[arg(
        long = "database-url",
        short = 'd',
        help = "URL of the PostgreSQL database to use. If unspecified, we'll attempt to use \
                the DATABASE_URL environment variable. If neither this option nor DATABASE_URL are available, \
                an error will be returned"
    )]
    pub database_url: Option<String>,
}


#[derive(Args)]
pub struct UpCommandArguments {
    #[command(flatten)]
    pub database: DatabaseArguments,

    #[arg(
        long = "yes",
        short = 'y',
        action = ArgAction::SetTrue,
        help = "Apply the migrations without asking for confirmation."
    )]
    pub skip_confirmation: bool,
}


#[derive(Args)]
pub struct DownCommandArguments {
    #[command(flatten)]
    pub database: DatabaseArguments,

    #[arg(
        long = "rollback-to-version",
        short = 'v',
        help = "Specifies the version of the database to rollback to. The version should match a defined migration \
                and must be smaller than the currently applied version. If you want to perform a rollback all the \
                way to the beginning, set this to 0."
    )]
    pub rollback_to_version: i64,

    #[arg(
        long = "yes",
        short = 'y',
        action = ArgAction::SetTrue,
        help = "Roll back without asking for confirmation."
    )]
    pub skip_confirmation: bool,
}


#[derive(Args)]
pub struct StatusCommandArguments {
    #[command(flatten)]
    pub database: DatabaseArguments,
}
