use std::path::PathBuf;

use anyhow::{bail, Result};
use blockfall::cli::{init_logging, load_board, parse_queue};
use blockfall_core::{GameState, Piece, PieceKind};
use blockfall_engine::{search, BoardConfig, RotationTrigger, SearchConfig, SearchStrategy};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Strategy {
    Exhaustive,
    Fast,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Trigger {
    Always,
    Contact,
    Bottom,
}

/// Lists every placement of the current piece.
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

    #[arg(long, help = "Current piece followed by the queue, e.g. TIOL")]
    queue: String,

    #[arg(long, help = "Held piece")]
    hold: Option<PieceKind>,

    #[arg(long, help = "Disable the swap placement")]
    no_swap: bool,

    #[arg(long, value_enum, default_value_t = Strategy::Exhaustive)]
    strategy: Strategy,

    #[arg(long, value_enum, default_value_t = Trigger::Always)]
    trigger: Trigger,

    #[arg(long, help = "Fast search: floor rotations for every kind")]
    post_drop_rotations: bool,

    #[arg(long, help = "Print placements as JSON")]
    json: bool,
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
    if queue.is_empty() {
        bail!("the queue needs at least the current piece");
    }
    let mut state = GameState::with_queue(board, queue);
    state.hold = cli.hold;
    state.can_swap = !cli.no_swap;
    if let Some(current) = state.current {
        info!(piece = %current, spawn = %Piece::spawn(current.kind, &state.board), "searching");
    }

    let config = SearchConfig {
        strategy: match cli.strategy {
            Strategy::Exhaustive => SearchStrategy::Exhaustive,
            Strategy::Fast => SearchStrategy::Fast,
        },
        rotation_trigger: match cli.trigger {
            Trigger::Always => RotationTrigger::Always,
            Trigger::Contact => RotationTrigger::PossibleContact,
            Trigger::Bottom => RotationTrigger::AtBottom,
        },
        post_drop_rotations: cli.post_drop_rotations,
    };
    let placements = search(&state, &config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&placements)?);
        return Ok(());
    }

    println!("{}", state.board);
    for placement in &placements {
        let spin = format!("{:?}", placement.spin);
        println!("{:<24} {:<5} {}", placement.piece.to_string(), spin, placement.path);
    }
    println!("{} placements", placements.len());
    Ok(())
}
