use blockfall_core::{Board, Cell, CollisionError, Piece};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::collision::check_validity;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockOutcome {
    /// Cleared cell rows, top to bottom, as they were before the shift.
    pub cleared_rows: SmallVec<[usize; 4]>,
    pub perfect_clear: bool,
    pub game_over: bool,
}

impl LockOutcome {
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// Writes `piece` into the board, clears the full rows it touched and
/// reports the result. Only rows the piece's frame covers can become full.
pub fn lock_piece(board: &mut Board, piece: &Piece) -> Result<LockOutcome, CollisionError> {
    if !check_validity(board, piece, (0, 0)) {
        return Err(CollisionError { piece: *piece });
    }

    for (r, c) in piece.cells() {
        board.write_cell(r as usize, c as usize, Cell::Piece(piece.kind));
    }
    trace!(%piece, "piece locked");

    let size = piece.shape().size as i32;
    let cleared_rows: SmallVec<[usize; 4]> = (piece.row as i32..piece.row as i32 + size)
        .filter(|&row| row >= 0 && board.is_row_full(row as usize))
        .map(|row| row as usize)
        .collect();

    if !cleared_rows.is_empty() {
        board.remove_rows(&cleared_rows);
        debug!(lines = cleared_rows.len(), "lines cleared");
    }

    let outcome = LockOutcome {
        perfect_clear: !cleared_rows.is_empty() && board.is_empty(),
        game_over: board.is_game_over(),
        cleared_rows,
    };
    if outcome.game_over {
        debug!("block left in the spawn buffer");
    }
    Ok(outcome)
}

/// Lock on a copy of the board.
pub fn apply_placement(
    board: &Board,
    piece: &Piece,
) -> Result<(Board, LockOutcome), CollisionError> {
    let mut next = board.clone();
    let outcome = lock_piece(&mut next, piece)?;
    Ok((next, outcome))
}
