//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// StateViz: replay a mutation log and inspect container state.
#[derive(Debug, Parser)]
#[command(name = "stateviz")]
#[command(about = "Replay a mutation log and inspect container state", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON-lines log file. The built-in example log is used when absent.
    #[arg(short, long, global = true, env = "STATEVIZ_LOG_FILE")]
    pub log: Option<PathBuf>,

    /// Configuration file path. Defaults to `./stateviz.yaml` if present.
    #[arg(short, long, global = true, env = "STATEVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do with the log.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the distinct container names in first-appearance order.
    Names,

    /// Project containers at one entry.
    Show {
        /// Entry index (0-based) or location label.
        #[arg(long)]
        at: String,

        /// Containers to show. Defaults to the session selection.
        #[arg(long = "container", value_name = "NAME")]
        containers: Vec<String>,

        /// Print a JSON snapshot instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Step through every entry, printing projections at each.
    Walk {
        /// Containers to show. Defaults to the session selection.
        #[arg(long = "container", value_name = "NAME")]
        containers: Vec<String>,
    },
}
