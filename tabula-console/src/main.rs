//! Tabula console
//!
//! Plays classic chess, hexagonal chess or checkers for two players at one
//! terminal. The engine validates every move; it never plays one itself.

mod command;
mod render;
mod session;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tabula_core::variants::VARIANT_NAMES;
use tabula_core::{by_name, ChessOptions, Game};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::{choose_variant, Session};

/// Exit status after Ctrl-C (128 + SIGINT).
const INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "tabula", version, about = "Two-player board games at the terminal")]
struct Args {
    /// Game to play; a menu is shown when absent
    #[arg(long, value_parser = VARIANT_NAMES)]
    variant: Option<String>,

    /// Refuse moves that leave the mover's king attacked (chess variants)
    #[arg(long)]
    king_safety: bool,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted, leaving the game.");
        std::process::exit(INTERRUPTED);
    })
    .context("installing Ctrl-C handler")?;

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let name = match args.variant {
        Some(name) => name,
        None => match choose_variant(&mut input, &mut output)? {
            Some(name) => name.to_string(),
            None => return Ok(()),
        },
    };

    let options = ChessOptions {
        king_safety: args.king_safety,
    };
    let rules = by_name(&name, options)?;
    let game = Game::new(rules)?;
    info!("[CONSOLE] Starting {} (king safety: {})", name, args.king_safety);

    Session::new(game, input, output).run()
}
