use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use blockfall::cli::{init_logging, load_board, parse_queue};
use blockfall_engine::perft::{perft_divide, perft_with};
use blockfall_engine::{BoardConfig, SearchConfig};
use clap::Parser;
use tracing::info;

/// Counts placement sequences for a fixed queue.
#[derive(Debug, Parser)]
struct Cli {
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE)"
    )]
    verbose: u8,

    #[arg(long, help = "Board file of '.'/'#' rows, aligned to the floor")]
    board: Option<PathBuf>,

    #[arg(long, default_value_t = 20)]
    height: usize,

    #[arg(long, default_value_t = 10)]
    width: usize,

    #[arg(long, default_value = "IOLJSZT")]
    queue: String,

    #[arg(long, default_value_t = 3)]
    depth: u32,

    #[arg(long, help = "Use the fast search at every level")]
    fast: bool,

    #[arg(long, help = "Print the count below each root placement")]
    divide: bool,

    #[arg(long, help = "Split root placements across threads")]
    parallel: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let board_config = BoardConfig::new(cli.height, cli.width);
    let board = match &cli.board {
        Some(path) => load_board(path, &board_config)?,
        None => board_config.build()?,
    };
    let queue = parse_queue(&cli.queue)?;
    if (cli.depth as usize) > queue.len() {
        bail!("depth {} needs at least {} queued pieces", cli.depth, cli.depth);
    }

    let start = Instant::now();
    if cli.divide {
        let mut total = 0;
        for (placement, nodes) in perft_divide(&board, &queue, cli.depth) {
            println!("{:<24} {:>10}  {}", placement.piece.to_string(), nodes, placement.path);
            total += nodes;
        }
        println!("total {total}");
        return Ok(());
    }

    let config = if cli.fast {
        SearchConfig::fast()
    } else {
        SearchConfig::default()
    };
    let nodes = if cli.parallel && !cli.fast {
        parallel(&board, &queue, cli.depth)?
    } else {
        perft_with(&board, &queue, cli.depth, &config)
    };
    let elapsed = start.elapsed();
    info!(?elapsed, "perft finished");
    println!(
        "depth {} nodes {} ({:.0} nodes/s)",
        cli.depth,
        nodes,
        nodes as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    Ok(())
}

#[cfg(feature = "rayon")]
fn parallel(
    board: &blockfall_core::Board,
    queue: &[blockfall_core::PieceKind],
    depth: u32,
) -> Result<u64> {
    Ok(blockfall_engine::perft::perft_parallel(board, queue, depth))
}

#[cfg(not(feature = "rayon"))]
fn parallel(
    _board: &blockfall_core::Board,
    _queue: &[blockfall_core::PieceKind],
    _depth: u32,
) -> Result<u64> {
    bail!("built without the rayon feature")
}
