//! Chess Perft - Counts the positions reachable from a setup.
//!
//! Walks every accepted move to the requested depth and prints the node
//! count, optionally broken down by root move.

mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chess_engine::{perft, perft_divide, Position};
use clap::Parser;
use config::Config;

/// Chess Perft - Counts leaf nodes of the legal move tree.
#[derive(Parser)]
#[command(name = "chess-perft")]
#[command(about = "Counts leaf nodes of the legal move tree")]
struct Args {
    /// Position to start from, in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Number of plies to search
    #[arg(long)]
    depth: Option<u32>,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Print the board before counting
    #[arg(long)]
    show: bool,

    /// TOML file supplying defaults for fen, depth and divide
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let fen = args.fen.unwrap_or(config.fen);
    let depth = args.depth.unwrap_or(config.depth);
    let divide = args.divide || config.divide;

    let position = Position::from_fen(&fen).with_context(|| format!("loading FEN '{fen}'"))?;
    if args.show {
        println!("{position}");
    }

    tracing::info!("Running perft to depth {} on {}", depth, fen);
    let start = Instant::now();
    let nodes = if divide {
        let results = perft_divide(&position, depth)?;
        for (mv, count) in &results {
            println!("{mv}: {count}");
        }
        println!();
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&position, depth)?
    };
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
    }
    Ok(())
}
