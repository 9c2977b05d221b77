//! Error types shared by the engine.

use thiserror::Error;

use crate::Piece;

/// Invalid board geometry or board text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {height} rows x {width} columns")]
    Empty { height: usize, width: usize },
    #[error("width {width} plus 2 x {padding_cols} guard columns needs {bits} bits, over 64")]
    TooWide {
        width: usize,
        padding_cols: usize,
        bits: usize,
    },
    #[error("{rows} rows including the buffer exceed the limit of {max}")]
    TooTall { rows: usize, max: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("{found} rows given but the board holds {capacity}")]
    TooManyRows { found: usize, capacity: usize },
}

/// Attempt to lock a piece over occupied or out-of-range cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cannot lock {piece}: it overlaps an occupied cell")]
pub struct CollisionError {
    pub piece: Piece,
}
