//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use itemsync_core::Overrides;

/// itemsync - Merge cataloged Item blocks into target documents
#[derive(Parser, Debug)]
#[command(name = "itemsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub paths: PathArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration and directory overrides shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArgs {
    /// Configuration file (defaults to ./itemsync.toml when present)
    #[arg(short, long, global = true, env = "ITEMSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source catalog directory
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Target document directory
    #[arg(long, global = true)]
    pub target: Option<PathBuf>,

    /// Output directory for merged documents, diffs and the missing report
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
}

impl PathArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source: self.source.clone(),
            target: self.target.clone(),
            output: self.output.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Preview changes, then apply them after confirmation
    ///
    /// Writes a diff per changed document, shows a summary and asks
    /// "Apply changes? (y/N)". Answering y recomputes everything and writes
    /// merged documents and the missing report to the output directory.
    Merge,

    /// Preview changes without applying them
    Diff {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List catalog identifiers matched by no target document
    Missing,
}
