//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `mitra`.
#[derive(Debug, Parser)]
#[command(name = "mitra", version, about = "Telugu-medium student assistant")]
pub struct Cli {
    /// Student grade level (1-10).
    #[arg(long, global = true, default_value = "6")]
    pub grade: String,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands, one per feature plus autocomplete.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Have a casual chat with the assistant.
    Chat {
        /// Message to send.
        message: String,
    },
    /// Ask a question.
    Ask {
        /// The question.
        question: String,
    },
    /// Summarize textbook content.
    Summarize {
        /// Content to summarize; omit when using --file.
        #[arg(required_unless_present = "file")]
        text: Option<String>,
        /// Read content from a file instead (plain text).
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Translate between Telugu and English.
    Translate {
        /// Text to translate.
        text: String,
        /// Source language (telugu|english); detected from script when omitted.
        #[arg(long)]
        from: Option<String>,
        /// Target language (telugu|english); complement of source when omitted.
        #[arg(long)]
        to: Option<String>,
    },
    /// Generate an illustration from Telugu text.
    Image {
        /// Telugu description of the scene.
        text: String,
    },
    /// Autocomplete suggestions for partial input.
    Suggest {
        /// The partial text being typed.
        text: String,
    },
}
