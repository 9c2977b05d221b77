//! blockfall - falling-block puzzle engine with placement search.
//!
//! Re-exports the core types and the engine, plus the helpers shared by the
//! command-line tools.

pub use blockfall_core as core;
pub use blockfall_engine as engine;

pub mod cli {
    use std::path::Path;

    use anyhow::{bail, Context, Result};
    use blockfall_core::{Board, PieceKind};
    use blockfall_engine::BoardConfig;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    /// `-v` count to level: none is WARN, then INFO, DEBUG, TRACE.
    pub fn level_for(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn init_logging(verbose: u8) {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(level_for(verbose))
            .init();
    }

    /// Reads a board file of `.`/`#` rows (piece letters allowed), aligned to
    /// the floor. Blank lines and lines starting with `;` are skipped.
    pub fn load_board(path: &Path, config: &BoardConfig) -> Result<Board> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading board file {}", path.display()))?;
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty() && !line.starts_with(';'))
            .collect();
        config
            .build_from_rows(&rows)
            .with_context(|| format!("parsing board file {}", path.display()))
    }

    pub fn parse_queue(queue: &str) -> Result<Vec<PieceKind>> {
        let mut kinds = Vec::with_capacity(queue.len());
        for letter in queue.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            match PieceKind::from_letter(letter.to_ascii_uppercase()) {
                Some(kind) => kinds.push(kind),
                None => bail!("unknown piece {letter:?} in queue {queue:?}"),
            }
        }
        Ok(kinds)
    }

}
