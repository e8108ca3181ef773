pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "goodthings")]
#[command(about = "Record three good things a day", long_about = None)]
pub struct Cli {
    /// Treat the network as unavailable (no comment requests)
    #[arg(long, global = true)]
    pub offline: bool,

    /// Use this database file instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save today's good things (up to three)
    Add {
        /// The good things, one argument each
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,

        /// Skip fetching comments after saving
        #[arg(long)]
        no_comment: bool,
    },
    /// Show today's entry
    Today,
    /// Show the entry for a date
    Show {
        /// Date as YYYY-MM-DD
        date: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List past entries, newest first
    List {
        /// Only entries on or after this date
        #[arg(long)]
        from: Option<String>,

        /// Only entries on or before this date
        #[arg(long)]
        to: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the items of an existing entry
    Edit {
        /// Date as YYYY-MM-DD
        date: String,

        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },
    /// Delete the entry for a date
    Delete {
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// Request a comment for one item
    Comment {
        /// Date as YYYY-MM-DD
        date: String,

        /// Item number, starting at 1
        number: usize,
    },
    /// Show streak and entry counts
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
