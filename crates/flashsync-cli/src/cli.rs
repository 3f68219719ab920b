//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// flashsync - Decide which flashcards need syncing
#[derive(Parser, Debug)]
#[command(name = "flashsync")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file with a [sync] table
    #[arg(short, long, global = true, env = "FLASHSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Classify local cards against remote records
    ///
    /// Examples:
    ///   flashsync check --local cards.json --remote notes.json
    ///   flashsync check --local cards.json --remote notes.json --json
    Check {
        /// JSON array of local cards
        #[arg(short, long)]
        local: PathBuf,

        /// JSON array of remote records, or a notesInfo response
        #[arg(short, long)]
        remote: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the store payload of every local card
    Payload {
        /// JSON array of local cards
        #[arg(short, long)]
        local: PathBuf,

        /// Build update payloads instead of creations
        #[arg(long)]
        update: bool,
    },

    /// Show the filename and comparison key of a Source value
    Source {
        /// The Source field text
        text: String,

        /// Card id to resolve the placeholder with
        #[arg(long)]
        id: Option<u64>,
    },
}
