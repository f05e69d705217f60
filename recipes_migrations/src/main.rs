use clap::Parser;
use cli::{CliArgs, CliCommand};
use commands::{down::cli_down, status::cli_status, up::cli_up};
use miette::Result;

mod cli;
mod commands;


pub fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // A missing .env file is fine, the variables may come from the environment.
    let _ = dotenvy::dotenv();

    match cli_args.command {
        CliCommand::Up(up_command_args) => cli_up(up_command_args),
        CliCommand::Down(down_command_args) => cli_down(down_command_args),
        CliCommand::Status(status_command_args) => cli_status(status_command_args),
    }
}
