//! perft - counts placement sequences for movegen verification
//! each level locks every placement of the next queued kind on a cloned board

use blockfall_core::{Board, Piece, PieceKind, Placement};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::apply::apply_placement;
use crate::config::{SearchConfig, SearchStrategy};
use crate::movegen::generate_placements;
use crate::movegen_fast::generate_placements_fast;

fn placements_for(board: &Board, kind: PieceKind, config: &SearchConfig) -> Vec<Placement> {
    let spawn = Piece::spawn(kind, board);
    match config.strategy {
        SearchStrategy::Exhaustive => generate_placements(board, spawn, config),
        SearchStrategy::Fast => generate_placements_fast(board, spawn, config),
    }
}

#[inline]
fn subtree(
    board: &Board,
    placement: &Placement,
    rest: &[PieceKind],
    depth: u32,
    config: &SearchConfig,
) -> u64 {
    apply_placement(board, &placement.piece)
        .map_or(0, |(next, _)| perft_with(&next, rest, depth - 1, config))
}

/// perft - leaf placement sequences at `depth` with the exhaustive search
pub fn perft(board: &Board, queue: &[PieceKind], depth: u32) -> u64 {
    perft_with(board, queue, depth, &SearchConfig::default())
}

pub fn perft_with(board: &Board, queue: &[PieceKind], depth: u32, config: &SearchConfig) -> u64 {
    if depth == 0 || queue.is_empty() {
        return 1;
    }

    let placements = placements_for(board, queue[0], config);
    if depth == 1 {
        return placements.len() as u64;
    }

    placements
        .iter()
        .map(|p| subtree(board, p, &queue[1..], depth, config))
        .sum()
}

/// Per-root-placement node counts; the counts sum to [`perft`].
pub fn perft_divide(board: &Board, queue: &[PieceKind], depth: u32) -> Vec<(Placement, u64)> {
    let config = SearchConfig::default();
    let Some(&kind) = queue.first() else {
        return Vec::new();
    };
    if depth == 0 {
        return Vec::new();
    }
    placements_for(board, kind, &config)
        .into_iter()
        .map(|p| {
            let nodes = if depth == 1 {
                1
            } else {
                subtree(board, &p, &queue[1..], depth, &config)
            };
            (p, nodes)
        })
        .collect()
}

/// Parallel perft - splits root placements across the rayon pool
#[cfg(feature = "rayon")]
pub fn perft_parallel(board: &Board, queue: &[PieceKind], depth: u32) -> u64 {
    if depth <= 1 || queue.is_empty() {
        return perft(board, queue, depth);
    }

    let config = SearchConfig::default();
    placements_for(board, queue[0], &config)
        .par_iter()
        .map(|p| subtree(board, p, &queue[1..], depth, &config))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_QUEUE: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// D1 placement counts per kind on the empty 10x20 board
    const D1_PER_PIECE: [(PieceKind, u64); 7] = [
        (PieceKind::I, 17),
        (PieceKind::O, 9),
        (PieceKind::L, 34),
        (PieceKind::J, 34),
        (PieceKind::S, 17),
        (PieceKind::Z, 17),
        (PieceKind::T, 34),
    ];

    #[test]
    fn test_depth_0_returns_1() {
        assert_eq!(perft(&Board::default(), &[], 0), 1);
        assert_eq!(perft(&Board::default(), &STANDARD_QUEUE, 0), 1);
    }

    #[test]
    fn test_d1_per_piece_counts() {
        let board = Board::default();
        for (kind, expected) in D1_PER_PIECE {
            assert_eq!(perft(&board, &[kind], 1), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_standard_queue_d2_d3() {
        let board = Board::default();
        assert_eq!(perft(&board, &STANDARD_QUEUE[..2], 2), 153);
        assert_eq!(perft(&board, &STANDARD_QUEUE[..3], 3), 5_268);
    }

    #[test]
    fn test_tio_d2() {
        let queue = [PieceKind::T, PieceKind::I, PieceKind::O];
        assert_eq!(perft(&Board::default(), &queue, 2), 600);
    }

    #[test]
    fn test_small_board() {
        let board = Board::new(5, 4).unwrap();
        let queue = [PieceKind::T, PieceKind::I, PieceKind::O];
        assert_eq!(perft(&board, &queue, 2), 50);
        assert_eq!(perft(&board, &queue, 3), 136);
    }

    #[test]
    fn test_fast_search_bounded_by_exhaustive() {
        let board = Board::new(5, 4).unwrap();
        let queue = [PieceKind::T, PieceKind::S, PieceKind::L];
        let fast = perft_with(&board, &queue, 3, &SearchConfig::fast());
        assert!(fast <= perft(&board, &queue, 3));
        assert!(fast > 0);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let board = Board::new(5, 4).unwrap();
        let queue = [PieceKind::T, PieceKind::I, PieceKind::O];
        let divide = perft_divide(&board, &queue, 3);
        assert_eq!(divide.len(), 10);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 136);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_baseline() {
        let board = Board::default();
        let queue = [PieceKind::T, PieceKind::I, PieceKind::O];
        assert_eq!(perft_parallel(&board, &queue, 2), perft(&board, &queue, 2));
        let small = Board::new(5, 4).unwrap();
        assert_eq!(perft_parallel(&small, &queue, 3), 136);
    }
}
