//! Command-line interface for strictly_arena.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Arena - Quoridor matches between agents
#[derive(Parser, Debug)]
#[command(name = "strictly_arena")]
#[command(about = "Run, replay and serve Quoridor agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match described by a TOML file
    Run {
        /// Path to the match configuration
        #[arg(short, long, default_value = "match.toml")]
        config: PathBuf,

        /// Write the trace here, overriding the configuration
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Do not print the board after every action
        #[arg(short, long)]
        quiet: bool,
    },

    /// Replay a recorded match in the terminal
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Pause between actions, in milliseconds
        #[arg(short, long)]
        delay_ms: Option<u64>,

        /// Pause as long as each player actually took
        #[arg(long, conflicts_with = "delay_ms")]
        recorded: bool,
    },

    /// Serve the built-in shortest-path agent over HTTP
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Agent name
        #[arg(long, default_value = "shortest-path")]
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["strictly_arena", "run"]).unwrap();
        match cli.command {
            Command::Run {
                config,
                trace,
                quiet,
            } => {
                assert_eq!(config, PathBuf::from("match.toml"));
                assert!(trace.is_none());
                assert!(!quiet);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_replay_pacing_flags_conflict() {
        let result = Cli::try_parse_from([
            "strictly_arena",
            "replay",
            "game.json",
            "--delay-ms",
            "100",
            "--recorded",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["strictly_arena", "serve", "--port", "9001"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: 9001, .. }));
    }
}
