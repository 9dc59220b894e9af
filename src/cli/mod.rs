//! Command-line interface for wordtally
//!
//! Argument parsing with clap, logging setup, and dispatch to the
//! per-command handlers in [`commands`].

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod output;

pub use output::Output;

/// Multi-threaded word statistics for text files
#[derive(Parser)]
#[command(name = "wordtally", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count words, vowel-initial words and consonant-final words
    Count(commands::count::CountArgs),
    /// Compute determinants of the matrices in binary files
    Det(commands::det::DetArgs),
    /// Configuration management
    Config(commands::config::ConfigArgs),
}

/// Flags shared by every command handler
pub struct Context {
    pub config: Option<PathBuf>,
    pub output: Output,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let ctx = Context {
            config: self.config,
            output: Output::new(self.verbose > 0, self.quiet),
        };

        match self.command {
            Some(Commands::Count(args)) => commands::count::execute(args, &ctx),
            Some(Commands::Det(args)) => commands::det::execute(args, &ctx),
            Some(Commands::Config(args)) => commands::config::execute(args, &ctx),
            None => {
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    // stderr keeps stdout clean for --format json
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wordtally", "count", "-vv", "--config", "x.toml", "a.txt"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Count(_))));
    }
}
