use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parley: chat with a document search service from the terminal.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Service base URL, e.g. http://localhost:8000.
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat shell (default).
    Chat,
    /// Ask one question, print the answer, and exit.
    Ask {
        /// The question.
        #[arg(required = true)]
        text: Vec<String>,

        /// Use the global search endpoint instead of the configured one.
        #[arg(long)]
        global: bool,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
