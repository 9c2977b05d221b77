//! Fast placement search.
//!
//! Rotates the spawn piece once per distinct orientation, slides it to every
//! reachable column and hard-drops it. T pieces (every kind with
//! `post_drop_rotations`) also try each turn after a soft drop to the floor.
//! Rotate-then-slide chains below the spawn rows are not explored, so some
//! tucks and spins the exhaustive search finds are missing here.

use blockfall_core::{ActionKind, ActionPath, Board, Piece, PieceKind, Placement, SpinType, Turn};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::collision::{check_validity, hard_drop};
use crate::config::SearchConfig;
use crate::movement::{classify_spin, try_move, try_rotate};

/// Bounded subset of [`generate_placements`](crate::movegen::generate_placements):
/// every result it lists is a legal resting position with a replayable path.
pub fn generate_placements_fast(
    board: &Board,
    spawn: Piece,
    config: &SearchConfig,
) -> Vec<Placement> {
    let mut placements = Vec::new();
    if !check_validity(board, &spawn, (0, 0)) {
        debug!(kind = %spawn.kind, "spawn blocked");
        return placements;
    }

    let mut footprints: FxHashSet<[(i8, i8); 4]> = FxHashSet::default();
    let mut record = |before_drop: Piece, landed: Piece, path: ActionPath| {
        if !footprints.insert(landed.footprint()) {
            return;
        }
        let last = path.last().map_or(ActionKind::None, |a| a.kind);
        let spin = if landed == before_drop {
            classify_spin(board, &landed, last)
        } else {
            SpinType::None
        };
        let path = path.with(ActionKind::HardDrop).cleaned();
        placements.push(Placement::new(landed, path).with_spin(spin));
    };

    let floor_turns = spawn.kind != PieceKind::O
        && (spawn.kind == PieceKind::T || config.post_drop_rotations);

    for &quarters in spawn.kind.distinct_rotations() {
        let (base, base_path) = match Turn::from_quarters(quarters) {
            None => (spawn, ActionPath::new()),
            Some(turn) => match try_rotate(board, &spawn, turn) {
                Some(result) => (result.piece, ActionPath::new().with(ActionKind::Rotate(turn))),
                None => continue,
            },
        };

        for (column, path) in slides(board, base, base_path) {
            let landed = hard_drop(board, &column);
            record(column, landed, path.clone());
            if !floor_turns {
                continue;
            }
            let floor_path = path.with(ActionKind::SoftDrop);
            for turn in Turn::ALL {
                let Some(result) = try_rotate(board, &landed, turn) else {
                    continue;
                };
                let rested = hard_drop(board, &result.piece);
                record(result.piece, rested, floor_path.with(ActionKind::Rotate(turn)));
            }
        }
    }

    debug!(
        kind = %spawn.kind,
        placements = placements.len(),
        "fast search finished"
    );
    placements
}

/// `base` followed by every column reachable by sliding left, then right.
fn slides(board: &Board, base: Piece, base_path: ActionPath) -> Vec<(Piece, ActionPath)> {
    let mut columns = vec![(base, base_path.clone())];
    for (d_col, action) in [(-1, ActionKind::StepLeft), (1, ActionKind::StepRight)] {
        let mut piece = base;
        let mut path = base_path.clone();
        while let Some(next) = try_move(board, &piece, d_col) {
            piece = next;
            path.push(action);
            columns.push((piece, path.clone()));
        }
    }
    columns
}
