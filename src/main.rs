//! chatsnip - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::io::Read;
use std::path::Path;

use chatsnip::cli::{Args, Commands};
use chatsnip::config::Config;
use chatsnip::context::{PromptWindow, TokenEstimator};
use chatsnip::{ChatError, Turn};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    match &args.command {
        Some(Commands::Estimate { file }) => run_estimate(file.as_deref(), &config),
        Some(Commands::Config) => show_config(&config),
        None => run_fit(&args, &config),
    }
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Fit a transcript into the token budget and print the prompt
fn run_fit(args: &Args, config: &Config) -> Result<()> {
    let raw = read_input(args.transcript.as_deref())?;
    let turns: Vec<Turn> = serde_json::from_str(&raw)
        .context("Transcript must be a JSON array of {text, is_user} turns")?;

    let max_tokens = args.max_tokens.unwrap_or(config.window.max_tokens);
    let estimator = TokenEstimator::with_ratio(config.estimator.tokens_per_char);
    let window = PromptWindow::with_estimator(max_tokens, estimator);

    match window.fit(&turns) {
        Ok(fitted) => {
            if fitted.was_truncated() && !args.quiet {
                eprintln!(
                    "{}",
                    format!(
                        "Dropped {} older turns to fit the {} token budget",
                        fitted.removed, max_tokens
                    )
                    .yellow()
                );
            }

            if args.verbose > 0 {
                eprintln!(
                    "{}",
                    format!(
                        "{} turns kept, ~{} of {} tokens",
                        fitted.turns.len(),
                        fitted.estimated_tokens,
                        max_tokens
                    )
                    .dimmed()
                );
            }

            print!("{}", fitted.prompt);
            Ok(())
        }
        Err(ChatError::PromptTooLong { .. }) => {
            eprintln!(
                "{}",
                "Your message is too long. Please try again with a shorter message.".red()
            );
            std::process::exit(1);
        }
    }
}

/// Print the token estimate for arbitrary text
fn run_estimate(file: Option<&Path>, config: &Config) -> Result<()> {
    let text = read_input(file)?;
    let estimator = TokenEstimator::with_ratio(config.estimator.tokens_per_char);

    println!("{}", estimator.estimate(&text));
    Ok(())
}

/// Print the config path and current contents
fn show_config(config: &Config) -> Result<()> {
    let path = Config::config_path()?;
    let rendered = toml::to_string_pretty(config).context("Failed to serialize config")?;

    println!("{}", format!("Config file: {}", path.display()).bold());
    print!("{}", rendered);
    Ok(())
}
