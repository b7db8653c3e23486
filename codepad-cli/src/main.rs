//! `codepad`: run and share code from the terminal.

mod cli;
mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use codepad_registry::LanguageRegistry;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::AppContext;

fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let ctx = AppContext {
        languages: Arc::new(LanguageRegistry::builtin()),
        db_path: cli.db,
        json: cli.json,
    };

    match cli.command {
        Command::Languages => commands::languages(&ctx)?,
        Command::Themes => commands::themes(&ctx)?,
        Command::Run(args) => {
            if !commands::run(&ctx, args).await? {
                std::process::exit(1);
            }
        }
        Command::History { user, limit } => commands::history(&ctx, &user, limit)?,
        Command::Stats { user } => commands::stats(&ctx, &user)?,
        Command::Snippet(command) => commands::snippet(&ctx, command)?,
    }
    Ok(())
}
