//! Rotation and movement logic with kick application.

use crate::collision::check_validity;
use crate::kicks::get_kicks;
use blockfall_core::{ActionKind, Board, Piece, PieceKind, Rotation, SpinType, Turn};
use tracing::trace;

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub piece: Piece,
    /// 0 when the plain rotation fit, otherwise 1 + index into the kick list.
    pub kick_index: usize,
}

/// Try to rotate a piece clockwise by `turn`, applying kicks if necessary.
/// Returns None if no candidate position is free.
pub fn try_rotate(board: &Board, piece: &Piece, turn: Turn) -> Option<RotationResult> {
    let rotated = piece.with_rotation(piece.rotation.turned(turn));

    // O covers the same cells in every state.
    if piece.kind == PieceKind::O {
        return Some(RotationResult {
            piece: rotated,
            kick_index: 0,
        });
    }

    if check_validity(board, &rotated, (0, 0)) {
        return Some(RotationResult {
            piece: rotated,
            kick_index: 0,
        });
    }

    for (i, &(d_row, d_col)) in get_kicks(piece.kind, piece.rotation, turn)
        .iter()
        .enumerate()
    {
        if check_validity(board, &rotated, (d_row, d_col)) {
            trace!(kind = %piece.kind, ?turn, kick = i + 1, "rotation kicked");
            return Some(RotationResult {
                piece: rotated.shifted(d_row, d_col),
                kick_index: i + 1,
            });
        }
    }

    None
}

/// Rotates `piece` in place by `quarters` clockwise quarter turns (mod 4).
/// On failure, or for a whole revolution, the piece is untouched and the
/// result is `false`.
pub fn rotate(board: &Board, piece: &mut Piece, quarters: u8) -> bool {
    let Some(turn) = Turn::from_quarters(quarters) else {
        return false;
    };
    match try_rotate(board, piece, turn) {
        Some(result) => {
            *piece = result.piece;
            true
        }
        None => false,
    }
}

#[inline]
pub fn try_shift(board: &Board, piece: &Piece, d_row: i8, d_col: i8) -> Option<Piece> {
    check_validity(board, piece, (d_row, d_col)).then(|| piece.shifted(d_row, d_col))
}

/// Try to move piece horizontally
#[inline]
pub fn try_move(board: &Board, piece: &Piece, d_col: i8) -> Option<Piece> {
    try_shift(board, piece, 0, d_col)
}

/// Try to move piece down one row
#[inline]
pub fn try_step_down(board: &Board, piece: &Piece) -> Option<Piece> {
    try_shift(board, piece, 1, 0)
}

/// Spin class of a resting piece. Only placements whose last action was a
/// rotation can spin.
pub fn classify_spin(board: &Board, piece: &Piece, last_action: ActionKind) -> SpinType {
    if !matches!(last_action, ActionKind::Rotate(_)) {
        return SpinType::None;
    }
    if piece.kind == PieceKind::T {
        return detect_tspin(board, piece);
    }
    if is_immobile(board, piece) {
        SpinType::Mini
    } else {
        SpinType::None
    }
}

/// 3-corner rule on the corners of the T's 3x3 frame
fn detect_tspin(board: &Board, piece: &Piece) -> SpinType {
    let (r, c) = (piece.row as i32, piece.col as i32);
    let corners = [(r, c), (r, c + 2), (r + 2, c), (r + 2, c + 2)];
    let mut filled = 0;
    let mut front_filled = 0;

    for (i, &(cr, cc)) in corners.iter().enumerate() {
        if !board.is_occupied(cr, cc) {
            continue;
        }
        filled += 1;
        // front corners flank the nub
        let is_front = match piece.rotation {
            Rotation::North => i < 2,
            Rotation::East => i == 1 || i == 3,
            Rotation::South => i >= 2,
            Rotation::West => i == 0 || i == 2,
        };
        if is_front {
            front_filled += 1;
        }
    }

    if filled < 3 {
        SpinType::None
    } else if front_filled >= 2 {
        SpinType::Full
    } else {
        SpinType::Mini
    }
}

/// can't move up, left or right - gravity could not have put it here
fn is_immobile(board: &Board, piece: &Piece) -> bool {
    !check_validity(board, piece, (-1, 0))
        && !check_validity(board, piece, (0, -1))
        && !check_validity(board, piece, (0, 1))
}
