use std::io;

use anyhow::Context;
use clap::Parser;
use textchess::board::RenderOptions;
use textchess::session::{self, SessionConfig, SessionEnd};
use tracing_subscriber::EnvFilter;

/// Two-player chess on the terminal. Moves are typed as `A 6 A 4`.
#[derive(Parser, Debug)]
#[command(name = "textchess", version)]
struct Args {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print one JSON event per line instead of boards and prompts.
    #[arg(long)]
    json: bool,

    /// Character drawn for empty squares.
    #[arg(long, default_value_t = '.')]
    empty: char,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig {
        json: args.json,
        render: RenderOptions { empty: args.empty },
    };
    let stdin = io::stdin();
    let end = session::run(stdin.lock(), io::stdout(), &config).context("session failed")?;
    if let SessionEnd::Won(color) = end {
        tracing::info!(winner = %color, "game finished");
    }
    Ok(())
}
