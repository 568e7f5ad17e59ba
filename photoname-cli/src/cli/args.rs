use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename photos in batches from a naming template, with preview and undo
#[derive(Parser, Debug)]
#[command(name = "photoname")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). PHOTONAME_LOG overrides this.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Which files to rename and how to label them
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Files to rename, in sequence order
    pub paths: Vec<PathBuf>,

    /// Rename every image file in this directory, ordered by name
    #[arg(long, value_name = "DIR", conflicts_with = "items")]
    pub dir: Option<PathBuf>,

    /// JSON file with an ordered list of {"path", "label", "group"} items
    #[arg(long, value_name = "FILE", conflicts_with_all = ["paths", "dir"])]
    pub items: Option<PathBuf>,

    /// Label for files given by path (defaults to the configured label)
    #[arg(long)]
    pub label: Option<String>,

    /// Group number for files given by path (defaults to the configured group)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub group: Option<u32>,

    /// Naming template, e.g. "V-{group}_{label}_{seq:003}"
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the planned renames without touching any file
    Preview {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Preview format
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Rename the files and record the batch for undo.
    ///
    /// Without files, executes the plan saved by the last `preview`.
    Apply {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Plan file to execute instead of the one saved by `preview`
        #[arg(long, value_name = "FILE", conflicts_with_all = ["paths", "dir", "items", "template"])]
        plan: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,

        /// Suppress summary output
        #[arg(long)]
        quiet: bool,
    },

    /// Reverse the most recent batch
    Undo {
        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// List recorded batches
    History {
        /// Limit number of entries shown
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },
}
