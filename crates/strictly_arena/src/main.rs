//! Strictly Arena - Unified CLI
//!
//! Plays configured matches, replays traces and serves agents over HTTP.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::time::Duration;
use strictly_arena::agents::{serve_agent, spawn_console_surface};
use strictly_arena::viewer::replay;
use strictly_arena::{ConsoleViewer, MatchConfig, ReplayPace, ShortestPathAgent, Trace};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_arena=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            trace,
            quiet,
        } => run_match(config, trace, quiet).await,
        Command::Replay {
            trace,
            delay_ms,
            recorded,
        } => run_replay(trace, delay_ms, recorded).await,
        Command::Serve { bind, port, name } => run_agent_server(bind, port, name).await,
    }
}

/// Play a match from a configuration file
#[instrument(skip_all, fields(config = %config_path.display()))]
async fn run_match(config_path: PathBuf, trace_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    let config = MatchConfig::from_file(&config_path)?;
    let (orchestrator, surfaces) = config.prepare()?;
    for requests in surfaces {
        spawn_console_surface(requests);
    }

    let mut orchestrator = if quiet {
        orchestrator
    } else {
        orchestrator.with_viewer(ConsoleViewer::new())
    };
    let outcome = orchestrator.run().await;

    println!("Winner: player {}", outcome.winner);
    println!("Ranking: {:?}", outcome.ranking);
    if !outcome.reason.is_empty() {
        println!("Reason: {}", outcome.reason);
    }

    if let Some(path) = trace_path.or_else(|| config.trace().clone()) {
        orchestrator
            .trace()
            .save(&path)
            .with_context(|| format!("Failed to save trace to {}", path.display()))?;
        info!(path = %path.display(), "Trace written");
    }
    Ok(())
}

/// Replay a recorded match
#[instrument(skip_all, fields(trace = %trace_path.display()))]
async fn run_replay(trace_path: PathBuf, delay_ms: Option<u64>, recorded: bool) -> Result<()> {
    let trace = Trace::open(&trace_path)?;
    // Refuse traces that do not replay cleanly before showing anything.
    trace.replay()?;

    let pace = match (delay_ms, recorded) {
        (_, true) => ReplayPace::Recorded,
        (Some(ms), false) => ReplayPace::Fixed(Duration::from_millis(ms)),
        (None, false) => ReplayPace::Instant,
    };
    let mut viewer = ConsoleViewer::new();
    replay(&mut viewer, &trace, pace).await;
    Ok(())
}

/// Serve the built-in agent over HTTP
async fn run_agent_server(bind: String, port: u16, name: String) -> Result<()> {
    info!(%bind, port, %name, "Starting agent server");
    serve_agent(Box::new(ShortestPathAgent::new(name)), &bind, port).await?;
    Ok(())
}
