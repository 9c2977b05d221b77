//! Piece kinds, rotation states and the compile-time shape catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Board;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

/// Clockwise rotation amount.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Turn {
    Quarter,
    Half,
    ThreeQuarter,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown piece kind {0:?} (expected one of I J L O S T Z)")]
pub struct ParsePieceError(pub String);

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        self.turned(Turn::Quarter)
    }

    pub fn ccw(self) -> Self {
        self.turned(Turn::ThreeQuarter)
    }

    pub fn flip(self) -> Self {
        self.turned(Turn::Half)
    }

    pub fn turned(self, turn: Turn) -> Self {
        Self::from_index(self.index() + turn.quarters() as usize)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wraps modulo 4.
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Quarter, Turn::Half, Turn::ThreeQuarter];

    pub const fn quarters(self) -> u8 {
        match self {
            Turn::Quarter => 1,
            Turn::Half => 2,
            Turn::ThreeQuarter => 3,
        }
    }

    /// `None` for a whole number of revolutions.
    pub const fn from_quarters(quarters: u8) -> Option<Self> {
        match quarters % 4 {
            1 => Some(Turn::Quarter),
            2 => Some(Turn::Half),
            3 => Some(Turn::ThreeQuarter),
            _ => None,
        }
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Non-zero id written into board cells (I = 1 .. Z = 7).
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_id(id: u8) -> Option<Self> {
        let index = id.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    pub const fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.letter() == letter.to_ascii_uppercase())
    }

    #[inline(always)]
    pub fn shape(self, rotation: Rotation) -> &'static Shape {
        &SHAPES[self.index()][rotation.index()]
    }

    /// Rotation counts that reach distinct footprints from spawn.
    pub fn distinct_rotations(self) -> &'static [u8] {
        match self {
            PieceKind::O => &[0],
            PieceKind::I | PieceKind::S | PieceKind::Z => &[0, 1],
            _ => &[0, 1, 2, 3],
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c).ok_or_else(|| ParsePieceError(s.to_string())),
            _ => Err(ParsePieceError(s.to_string())),
        }
    }
}

/// One rotation state of a piece: occupied cells inside a `size x size` frame
/// and the same cells as one bit mask per frame row (bit `c` = frame column `c`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Shape {
    pub size: u8,
    pub cells: [(u8, u8); 4],
    pub row_masks: [u8; 4],
    pub min_col: u8,
    pub max_col: u8,
}

impl Shape {
    const fn from_cells(size: u8, cells: [(u8, u8); 4]) -> Self {
        let mut row_masks = [0u8; 4];
        let mut min_col = u8::MAX;
        let mut max_col = 0;
        let mut i = 0;
        while i < 4 {
            let (r, c) = cells[i];
            row_masks[r as usize] |= 1 << c;
            if c < min_col {
                min_col = c;
            }
            if c > max_col {
                max_col = c;
            }
            i += 1;
        }
        Self {
            size,
            cells,
            row_masks,
            min_col,
            max_col,
        }
    }

    /// new[r][c] = old[size - 1 - c][r]
    const fn rotated_cw(&self) -> Self {
        let mut cells = [(0u8, 0u8); 4];
        let mut i = 0;
        while i < 4 {
            let (r, c) = self.cells[i];
            cells[i] = (c, self.size - 1 - r);
            i += 1;
        }
        Self::from_cells(self.size, cells)
    }
}

const fn states(size: u8, spawn: [(u8, u8); 4], rotates: bool) -> [Shape; 4] {
    let north = Shape::from_cells(size, spawn);
    if !rotates {
        return [north; 4];
    }
    let east = north.rotated_cw();
    let south = east.rotated_cw();
    let west = south.rotated_cw();
    [north, east, south, west]
}

static SHAPES: [[Shape; 4]; 7] = [
    states(4, [(1, 0), (1, 1), (1, 2), (1, 3)], true),
    states(3, [(0, 0), (1, 0), (1, 1), (1, 2)], true),
    states(3, [(0, 2), (1, 0), (1, 1), (1, 2)], true),
    states(3, [(0, 1), (0, 2), (1, 1), (1, 2)], false),
    states(3, [(0, 1), (0, 2), (1, 0), (1, 1)], true),
    states(3, [(0, 1), (1, 0), (1, 1), (1, 2)], true),
    states(3, [(0, 0), (0, 1), (1, 1), (1, 2)], true),
];

/// A piece instance: kind, rotation and the top-left corner of its frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub row: i8,
    pub col: i8,
    pub rotation: Rotation,
}

impl Piece {
    pub const SPAWN_ROW: i8 = 1;

    pub fn new(kind: PieceKind, row: i8, col: i8, rotation: Rotation) -> Self {
        Self {
            kind,
            row,
            col,
            rotation,
        }
    }

    /// Spawn configuration: row 1 of the buffer, frame centred by `(width - 3) / 2`.
    pub fn spawn(kind: PieceKind, board: &Board) -> Self {
        let col = (board.width().saturating_sub(3) / 2) as i8;
        Self::new(kind, Self::SPAWN_ROW, col, Rotation::North)
    }

    #[inline(always)]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Board coordinates of the four occupied cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape()
            .cells
            .map(|(r, c)| (self.row + r as i8, self.col + c as i8))
    }

    /// Sorted cells; identical for configurations covering the same squares.
    pub fn footprint(&self) -> [(i8, i8); 4] {
        let mut cells = self.cells();
        cells.sort_unstable();
        cells
    }

    pub fn signature(&self) -> (i8, i8, Rotation) {
        (self.row, self.col, self.rotation)
    }

    #[inline(always)]
    pub fn shifted(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self
        }
    }

    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} col {} {:?}",
            self.kind, self.row, self.col, self.rotation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cells: [(u8, u8); 4]) -> [(u8, u8); 4] {
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_t_north_cells() {
        let shape = PieceKind::T.shape(Rotation::North);
        assert_eq!(shape.size, 3);
        assert_eq!(sorted(shape.cells), [(0, 1), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(shape.row_masks, [0b010, 0b111, 0, 0]);
    }

    #[test]
    fn test_t_east_points_right() {
        let shape = PieceKind::T.shape(Rotation::East);
        assert_eq!(sorted(shape.cells), [(0, 1), (1, 1), (1, 2), (2, 1)]);
        assert_eq!(shape.min_col, 1);
        assert_eq!(shape.max_col, 2);
    }

    #[test]
    fn test_i_vertical_in_column_two() {
        let shape = PieceKind::I.shape(Rotation::East);
        assert_eq!(sorted(shape.cells), [(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(shape.row_masks, [0b0100; 4]);
        let west = PieceKind::I.shape(Rotation::West);
        assert_eq!(sorted(west.cells), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_o_states_identical() {
        let north = PieceKind::O.shape(Rotation::North);
        for rot in Rotation::ALL {
            assert_eq!(PieceKind::O.shape(rot), north);
        }
    }

    #[test]
    fn test_four_cw_rotations_identity() {
        // O keeps its spawn cells in every state, so it has no cycle to close
        for kind in PieceKind::ALL
            .into_iter()
            .filter(|k| k.distinct_rotations().len() > 1)
        {
            for rotation in Rotation::ALL {
                let from = kind.shape(rotation);
                let next = kind.shape(rotation.cw());
                assert_eq!(
                    sorted(from.rotated_cw().cells),
                    sorted(next.cells),
                    "{kind:?} {rotation:?}"
                );
            }
        }
    }

    #[test]
    fn test_rotation_cw() {
        assert_eq!(Rotation::North.cw(), Rotation::East);
        assert_eq!(Rotation::East.cw(), Rotation::South);
        assert_eq!(Rotation::South.cw(), Rotation::West);
        assert_eq!(Rotation::West.cw(), Rotation::North);
    }

    #[test]
    fn test_rotation_ccw_and_flip() {
        assert_eq!(Rotation::North.ccw(), Rotation::West);
        assert_eq!(Rotation::West.ccw(), Rotation::South);
        assert_eq!(Rotation::East.flip(), Rotation::West);
    }

    #[test]
    fn test_turn_from_quarters() {
        assert_eq!(Turn::from_quarters(0), None);
        assert_eq!(Turn::from_quarters(4), None);
        assert_eq!(Turn::from_quarters(5), Some(Turn::Quarter));
        assert_eq!(Turn::from_quarters(3), Some(Turn::ThreeQuarter));
    }

    #[test]
    fn test_ids_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("t".parse::<PieceKind>(), Ok(PieceKind::T));
        assert_eq!(" Z ".parse::<PieceKind>(), Ok(PieceKind::Z));
        assert!("TT".parse::<PieceKind>().is_err());
        assert!("X".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_footprint_equates_i_states() {
        let flat_north = Piece::new(PieceKind::I, 5, 0, Rotation::North);
        let flat_south = Piece::new(PieceKind::I, 4, 0, Rotation::South);
        assert_eq!(flat_north.footprint(), flat_south.footprint());
        assert_ne!(flat_north.signature(), flat_south.signature());
    }
}
