//! collision detection - walls, floor, buffer ceiling, other blocks

use blockfall_core::{Board, Piece};

/// Is `piece` moved by `(d_row, d_col)` clear of blocks, guards and the
/// board edge? Each frame row mask is shifted into board bit indexing and
/// ANDed with the row word.
#[inline]
pub fn check_validity(board: &Board, piece: &Piece, offset: (i8, i8)) -> bool {
    let shape = piece.shape();
    let row = piece.row as i32 + offset.0 as i32;
    let base = board.padding_cols() as i32 + piece.col as i32 + offset.1 as i32;
    if base + (shape.min_col as i32) < 0
        || base + (shape.max_col as i32) >= board.total_width() as i32
    {
        return false;
    }
    for (i, &mask) in shape.row_masks[..shape.size as usize].iter().enumerate() {
        if mask == 0 {
            continue;
        }
        let Some(word) = board.row_word(row + i as i32) else {
            return false;
        };
        let shifted = if base >= 0 {
            (mask as u64) << base
        } else {
            (mask as u64) >> -base
        };
        if word & shifted != 0 {
            return false;
        }
    }
    true
}

/// Cell-by-cell reference for [`check_validity`].
pub fn check_validity_naive(board: &Board, piece: &Piece, offset: (i8, i8)) -> bool {
    piece.cells().iter().all(|&(r, c)| {
        !board.is_occupied(r as i32 + offset.0 as i32, c as i32 + offset.1 as i32)
    })
}

#[inline]
pub fn at_bottom(board: &Board, piece: &Piece) -> bool {
    !check_validity(board, piece, (1, 0))
}

/// Rows the piece can fall before it rests.
#[inline]
pub fn drop_distance(board: &Board, piece: &Piece) -> i8 {
    let mut distance = 0;
    while check_validity(board, piece, (distance + 1, 0)) {
        distance += 1;
    }
    distance
}

pub fn hard_drop(board: &Board, piece: &Piece) -> Piece {
    piece.shifted(drop_distance(board, piece), 0)
}

/// Any cell of the piece's whole frame is occupied or out of range.
pub fn touches_occupied(board: &Board, piece: &Piece) -> bool {
    let size = piece.shape().size as i32;
    (0..size).any(|r| {
        (0..size).any(|c| board.is_occupied(piece.row as i32 + r, piece.col as i32 + c))
    })
}
