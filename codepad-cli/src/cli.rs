//! Command-line arguments for `codepad`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "codepad", version, about = "Run and share code snippets from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More logging (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Database file (default: platform data dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List supported languages.
    Languages,

    /// List editor themes.
    Themes,

    /// Run a source file on the execution backend.
    Run(RunArgs),

    /// Show recent runs.
    History {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show profile statistics.
    Stats {
        #[arg(long)]
        user: String,
    },

    /// Shared snippets.
    #[command(subcommand)]
    Snippet(SnippetCommand),
}

#[derive(Args)]
pub struct RunArgs {
    pub file: PathBuf,

    /// Language id; inferred from the file extension when omitted.
    #[arg(short, long)]
    pub language: Option<String>,

    /// Record the run in this user's history.
    #[arg(long)]
    pub user: Option<String>,

    /// Execution endpoint (overrides CODEPAD_ENDPOINT).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides CODEPAD_TIMEOUT_SECS).
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum SnippetCommand {
    /// Share a file as a snippet.
    Share {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        user: String,
        /// Display name shown as the author.
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List all snippets, newest first.
    List,

    /// Search by title, language or author.
    Search {
        query: String,
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print a snippet's code.
    Show { id: String },

    /// Delete one of your snippets.
    Delete {
        id: String,
        #[arg(long)]
        user: String,
    },

    /// Star or unstar a snippet.
    Star {
        id: String,
        #[arg(long)]
        user: String,
    },
}
