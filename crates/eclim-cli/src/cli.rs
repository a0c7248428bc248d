//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eclim-java")]
#[command(about = "Java go-to-definition, completion, validation and auto-import through eclim")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file (default: <config dir>/eclim-java/settings.json)
    #[arg(long, global = true)]
    pub(crate) settings: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Store the location of the eclim executable
    SetToolPath {
        /// Path of the eclim executable; `~` is expanded
        path: String,
    },

    /// Print the definition location of the word at an offset
    Definition {
        /// Java source file
        file: PathBuf,
        /// Character offset of the caret
        #[arg(long)]
        offset: usize,
    },

    /// Run the class of a Java file and print its output
    Run {
        /// Java source file
        file: PathBuf,
    },

    /// Print completion proposals at an offset as `display<TAB>insert` lines
    Complete {
        /// Java source file
        file: PathBuf,
        /// Character offset of the caret
        #[arg(long)]
        offset: usize,
    },

    /// Validate a Java file and print its compile errors
    Validate {
        /// Java source file
        file: PathBuf,
        /// Validate again after the post-save delay
        #[arg(long)]
        recheck: bool,
    },

    /// Import the class named by the word at an offset
    Import {
        /// Java source file
        file: PathBuf,
        /// Character offset of the caret
        #[arg(long)]
        offset: usize,
        /// Candidate to pick (0-based) when several classes match; prompts otherwise
        #[arg(long)]
        pick: Option<usize>,
    },
}
