//! Command-line argument parsing for chatsnip
//!
//! Provides clap-based CLI with subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chatsnip - Fit multi-turn chat history into a model token budget
#[derive(Parser, Debug)]
#[command(name = "chatsnip")]
#[command(version = "0.1.0")]
#[command(about = "Fit multi-turn chat history into a model token budget", long_about = None)]
pub struct Args {
    /// Transcript to fit: a JSON array of turns (stdin when omitted)
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: Option<PathBuf>,

    /// Token budget for the rendered prompt (overrides the config file)
    #[arg(short, long)]
    pub max_tokens: Option<usize>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress everything except the prompt)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the token count of a text file or stdin
    Estimate {
        /// Text to estimate (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Display current configuration
    Config,
}
