//! Exhaustive placement search.
//!
//! Breadth-first over `(row, col, rotation)` from the spawn configuration.
//! Successors are tried as step down, left, right, then the three clockwise
//! turns through the kick engine. A signature is marked visited when it is
//! enqueued, so the first path to reach it is the one kept. Every dequeued
//! node that rests on something yields a placement, unless an earlier
//! placement already covers the same cells.

use std::collections::VecDeque;

use blockfall_core::{
    ActionKind, ActionPath, Board, GameState, Piece, PieceKind, Placement, Rotation, Turn,
};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::collision::{at_bottom, check_validity, touches_occupied};
use crate::config::{RotationTrigger, SearchConfig, SearchStrategy};
use crate::movegen_fast::generate_placements_fast;
use crate::movement::{classify_spin, try_rotate, try_shift};

const STEPS: [(i8, i8, ActionKind); 3] = [
    (1, 0, ActionKind::StepDown),
    (0, -1, ActionKind::StepLeft),
    (0, 1, ActionKind::StepRight),
];

struct Node {
    piece: Piece,
    path: ActionPath,
}

/// Every distinct resting position reachable from `spawn`, each with one
/// cleaned action path ending in a hard drop. Empty when `spawn` itself
/// collides.
pub fn generate_placements(board: &Board, spawn: Piece, config: &SearchConfig) -> Vec<Placement> {
    let mut placements = Vec::new();
    if !check_validity(board, &spawn, (0, 0)) {
        debug!(kind = %spawn.kind, "spawn blocked");
        return placements;
    }

    let mut visited: FxHashSet<(i8, i8, Rotation)> = FxHashSet::default();
    let mut footprints: FxHashSet<[(i8, i8); 4]> = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(spawn.signature());
    queue.push_back(Node {
        piece: spawn,
        path: ActionPath::new(),
    });
    let mut expanded = 0usize;

    while let Some(node) = queue.pop_front() {
        expanded += 1;
        let resting = at_bottom(board, &node.piece);

        if resting && footprints.insert(node.piece.footprint()) {
            let last = node.path.last().map_or(ActionKind::None, |a| a.kind);
            let spin = classify_spin(board, &node.piece, last);
            let path = node.path.with(ActionKind::HardDrop).cleaned();
            placements.push(Placement::new(node.piece, path).with_spin(spin));
        }

        for (d_row, d_col, action) in STEPS {
            if let Some(next) = try_shift(board, &node.piece, d_row, d_col) {
                if visited.insert(next.signature()) {
                    queue.push_back(Node {
                        piece: next,
                        path: node.path.with(action),
                    });
                }
            }
        }

        if !expands_rotations(board, &node.piece, resting, config.rotation_trigger) {
            continue;
        }
        for turn in Turn::ALL {
            if let Some(result) = try_rotate(board, &node.piece, turn) {
                if visited.insert(result.piece.signature()) {
                    queue.push_back(Node {
                        piece: result.piece,
                        path: node.path.with(ActionKind::Rotate(turn)),
                    });
                }
            }
        }
    }

    debug!(
        kind = %spawn.kind,
        expanded,
        placements = placements.len(),
        "exhaustive search finished"
    );
    placements
}

fn expands_rotations(
    board: &Board,
    piece: &Piece,
    resting: bool,
    trigger: RotationTrigger,
) -> bool {
    if piece.kind == PieceKind::O {
        return false;
    }
    match trigger {
        RotationTrigger::Always => true,
        RotationTrigger::PossibleContact => touches_occupied(board, piece),
        RotationTrigger::AtBottom => resting,
    }
}

/// Placements for a snapshot's current piece using the configured strategy.
/// When swapping is allowed the swap comes first as a single `Swap` action,
/// its piece being the held kind (or the next queued kind) at spawn.
pub fn search(state: &GameState, config: &SearchConfig) -> Vec<Placement> {
    let Some(current) = state.current else {
        return Vec::new();
    };
    if state.game_over {
        return Vec::new();
    }

    let mut placements = Vec::new();
    if state.can_swap {
        if let Some(kind) = state.swap_kind() {
            let swapped = Piece::spawn(kind, &state.board);
            if check_validity(&state.board, &swapped, (0, 0)) {
                placements.push(Placement::new(
                    swapped,
                    [ActionKind::Swap].into_iter().collect(),
                ));
            }
        }
    }

    placements.extend(match config.strategy {
        SearchStrategy::Exhaustive => generate_placements(&state.board, current, config),
        SearchStrategy::Fast => generate_placements_fast(&state.board, current, config),
    });
    placements
}
