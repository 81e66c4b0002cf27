//! Ghostcell CLI - play a game over stdin/stdout or replay a recorded one.

// Allow unwrap in tests and print in the CLI binary
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Ghostcell - a heuristic factory conquest bot
#[derive(Parser, Debug)]
#[command(name = "ghostcell")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Strategy weights file (JSON), used when no command is given
    #[arg(short, long)]
    weights: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game: read the host on stdin, answer on stdout (default)
    Play {
        /// Strategy weights file (JSON)
        #[arg(short, long)]
        weights: Option<PathBuf>,
    },

    /// Run the bot over a recorded input transcript
    Replay {
        /// Transcript of the host's input
        #[arg(required = true)]
        transcript: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Strategy weights file (JSON)
        #[arg(short, long)]
        weights: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Stdout carries the game protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        None => cli::play::execute(args.weights.as_deref()),
        Some(Commands::Play { weights }) => {
            cli::play::execute(weights.or(args.weights).as_deref())
        }
        Some(Commands::Replay {
            transcript,
            format,
            weights,
        }) => cli::replay::execute(&transcript, format, weights.or(args.weights).as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
