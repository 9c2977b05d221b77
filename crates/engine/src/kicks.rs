//! Wall-kick tables.
//!
//! Offsets are `(row, col)` with rows growing downward, tried in order after
//! the unkicked rotation. Quarter-turn rows follow SRS; half-turn rows are a
//! dedicated 180 table, never two chained quarter turns.

use blockfall_core::{PieceKind, Rotation, Turn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KickClass {
    I,
    Jlstz,
}

impl KickClass {
    /// `None` for O, which never kicks.
    pub fn of(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::O => None,
            PieceKind::I => Some(KickClass::I),
            _ => Some(KickClass::Jlstz),
        }
    }
}

/// Kick candidates for rotating `kind` out of `from` by `turn`.
pub fn get_kicks(kind: PieceKind, from: Rotation, turn: Turn) -> &'static [(i8, i8)] {
    match KickClass::of(kind) {
        Some(KickClass::I) => i_kicks(from, turn),
        Some(KickClass::Jlstz) => jlstz_kicks(from, turn),
        None => &[],
    }
}

fn jlstz_kicks(from: Rotation, turn: Turn) -> &'static [(i8, i8)] {
    use Rotation::*;
    use Turn::*;
    match (from, turn) {
        (North, Quarter) => &[(0, -1), (-1, -1), (2, 0), (2, -1)],
        (North, ThreeQuarter) => &[(0, 1), (-1, 1), (2, 0), (2, 1)],
        (East, Quarter) | (East, ThreeQuarter) => &[(0, 1), (1, 1), (-2, 0), (-2, 1)],
        (South, Quarter) => &[(0, 1), (-1, 1), (2, 0), (2, 1)],
        (South, ThreeQuarter) => &[(0, -1), (-1, -1), (2, 0), (2, -1)],
        // SRS has (-2, 0) here. Client tables that list (2, 0) break the
        // mirror of the East rows and must not be copied back in.
        (West, Quarter) | (West, ThreeQuarter) => &[(0, -1), (1, -1), (-2, 0), (-2, -1)],

        (North, Half) => &[
            (1, 0),
            (2, 0),
            (1, 1),
            (2, 1),
            (-1, 0),
            (-2, 0),
            (-1, 1),
            (-2, 1),
            (0, -1),
            (3, 0),
            (-3, 0),
        ],
        (East, Half) => &[
            (0, 1),
            (0, 2),
            (-1, 1),
            (-1, 2),
            (0, -1),
            (0, -2),
            (-1, -1),
            (-1, -2),
            (1, 0),
            (0, 3),
            (0, -3),
        ],
        (South, Half) => &[
            (-1, 0),
            (-2, 0),
            (-1, -1),
            (-2, -1),
            (1, 0),
            (2, 0),
            (1, -1),
            (2, -1),
            (0, 1),
            (-3, 0),
            (3, 0),
        ],
        (West, Half) => &[
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 2),
            (0, -1),
            (0, -2),
            (1, -1),
            (1, -2),
            (-1, 0),
            (0, 3),
            (0, -3),
        ],
    }
}

fn i_kicks(from: Rotation, turn: Turn) -> &'static [(i8, i8)] {
    use Rotation::*;
    use Turn::*;
    match (from, turn) {
        (North, Quarter) => &[(0, -2), (0, 1), (1, -2), (-2, 1)],
        (North, ThreeQuarter) => &[(0, -1), (0, 2), (-2, -1), (1, 2)],
        (East, Quarter) => &[(0, -1), (0, 2), (-2, -1), (1, 2)],
        (East, ThreeQuarter) => &[(0, 2), (0, -1), (-1, 2), (2, -1)],
        (South, Quarter) => &[(0, 2), (0, -1), (-1, 2), (2, -1)],
        (South, ThreeQuarter) => &[(0, 1), (0, -2), (2, 1), (-1, -2)],
        (West, Quarter) => &[(0, 1), (0, -2), (2, 1), (-1, -2)],
        // (-2, 1), not the (2, 1) some client tables carry
        (West, ThreeQuarter) => &[(0, -2), (0, 1), (1, -2), (-2, 1)],

        (North, Half) => &[(-1, 0), (-2, 0), (1, 0), (2, 0), (0, 1)],
        (East, Half) => &[(0, 1), (0, 2), (0, -1), (0, -2), (-1, 0)],
        (South, Half) => &[(1, 0), (2, 0), (-1, 0), (-2, 0), (0, -1)],
        (West, Half) => &[(0, 1), (0, 2), (0, -1), (0, -2), (1, 0)],
    }
}
