//! CLI module for tldw.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tldw - too long; didn't watch
///
/// Summarize YouTube videos from the command line, with every section backed
/// by a quote found in the transcript and a link to that moment.
#[derive(Parser, Debug)]
#[command(name = "tldw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a YouTube video
    Summarize {
        /// YouTube URL or video ID
        url: String,

        /// What specific info are you looking for?
        #[arg(short, long)]
        gimme: Option<String>,

        /// Model id to use instead of the selected one
        #[arg(short, long)]
        model: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Read transcript fragments from a JSON file instead of fetching
        #[arg(short, long)]
        transcript: Option<String>,

        /// Fetch the transcript again even if it is cached
        #[arg(short, long)]
        force: bool,
    },

    /// Pick the model to summarize with
    Setup,

    /// List or select models
    Models {
        #[command(subcommand)]
        action: ModelsAction,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List available models
    List,

    /// Select a model from the catalog
    Set {
        /// Model id (e.g. "openai/gpt-5")
        id: String,
    },

    /// Use a model that is not in the catalog
    Custom {
        /// Model id in provider/model form
        id: String,

        /// Provider serving the model (anthropic, openai, openrouter)
        #[arg(short, long, default_value = "openrouter")]
        provider: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
