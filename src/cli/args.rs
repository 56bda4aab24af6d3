//! Command line argument parsing for the typofix CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Typofix - A frequency-driven spelling corrector
#[derive(Parser, Debug, Clone)]
#[command(name = "typofix")]
#[command(about = "A frequency-driven spelling corrector")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TypofixArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Corrector configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Where the word frequencies come from
    #[command(flatten)]
    pub source: ModelSource,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TypofixArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// The file a frequency model is loaded from. Exactly one is required and it
/// must precede the subcommand.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ModelSource {
    /// Plain text corpus to count words from
    #[arg(long, value_name = "CORPUS_FILE")]
    pub corpus: Option<PathBuf>,

    /// Frequency file with one `word count` pair per line
    #[arg(long, value_name = "FREQUENCY_FILE")]
    pub frequency_file: Option<PathBuf>,

    /// Binary model snapshot
    #[arg(long, value_name = "SNAPSHOT_FILE")]
    pub snapshot: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct individual words
    Correct(CorrectArgs),

    /// Correct a whole text, keeping its whitespace
    Text(TextArgs),

    /// Show ranked suggestions for a word
    Suggest(SuggestArgs),

    /// Show model statistics
    Stats(StatsArgs),

    /// Write the loaded model to a file
    Build(BuildArgs),

    /// Count the candidates generated for a word
    Edits(EditsArgs),
}

/// Arguments for correcting words
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Words to correct
    #[arg(value_name = "WORDS", required = true)]
    pub words: Vec<String>,
}

/// Arguments for correcting a text
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// Text file to correct (defaults to stdin)
    #[arg(short, long, value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,
}

/// Arguments for suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Word to find suggestions for
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Maximum number of suggestions
    #[arg(short, long, default_value = "5")]
    pub limit: usize,
}

/// Arguments for model statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Number of most frequent words to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,
}

/// Arguments for writing a model file
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Output file path
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Kind of file to write
    #[arg(short, long, default_value = "snapshot")]
    pub kind: ModelFileKind,
}

/// Arguments for candidate generation
#[derive(Parser, Debug, Clone)]
pub struct EditsArgs {
    /// Word to generate edits for
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Edit distance (1 or 2)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub distance: u8,

    /// List the candidates that are vocabulary words
    #[arg(long)]
    pub list: bool,
}

/// Model file formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFileKind {
    /// Text file of `word count` lines
    Frequency,
    /// Binary snapshot
    Snapshot,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
