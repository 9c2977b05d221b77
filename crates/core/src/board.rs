//! board representation - cell grid plus guarded row bitwords
//! both views change together through `write_cell` and the row shifting helpers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::PieceKind;

/// Contents of one board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
    /// Occupied cell with no piece identity (fixtures, garbage).
    Garbage,
}

impl Cell {
    #[inline(always)]
    pub fn is_occupied(self) -> bool {
        self != Cell::Empty
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(kind) => kind.letter(),
            Cell::Garbage => '#',
        }
    }

    /// `.`, `0` and space are empty, piece letters keep their kind, anything else is garbage.
    pub fn from_char(c: char) -> Self {
        match c {
            '.' | '0' | ' ' => Cell::Empty,
            _ => PieceKind::from_letter(c).map_or(Cell::Garbage, Cell::Piece),
        }
    }
}

/// Narrowest machine word covering one guarded row.
///
/// Informational only: construction uses it to reject rows wider than 64
/// bits, but row words are always stored and probed as `u64`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum WordSize {
    W8,
    W16,
    W32,
    W64,
}

impl WordSize {
    pub fn for_bits(bits: usize) -> Option<Self> {
        match bits {
            0..=8 => Some(WordSize::W8),
            9..=16 => Some(WordSize::W16),
            17..=32 => Some(WordSize::W32),
            33..=64 => Some(WordSize::W64),
            _ => None,
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            WordSize::W8 => 8,
            WordSize::W16 => 16,
            WordSize::W32 => 32,
            WordSize::W64 => 64,
        }
    }
}

/// Padded playfield.
///
/// Cell rows `0..padding_rows` are the hidden spawn buffer, the next `height`
/// rows are the visible field. Row 0 is the top. `rows` holds one bitword per
/// cell row followed by `padding_rows` all-ones guard rows below the floor;
/// bit `padding_cols + c` is column `c` and the `padding_cols` bits on either
/// side are permanently set. Words live in `u64` lanes whatever the
/// [`WordSize`].
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    height: usize,
    width: usize,
    padding_rows: usize,
    padding_cols: usize,
    word_size: WordSize,
    cells: Vec<Cell>,
    rows: Vec<u64>,
    empty_row: u64,
    full_row: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::alloc(
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_PADDING,
            Self::DEFAULT_PADDING,
            WordSize::W32,
        )
    }
}

impl Board {
    pub const DEFAULT_HEIGHT: usize = 20;
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_PADDING: usize = 4;
    /// Buffer plus visible rows; keeps every frame coordinate inside `i8`.
    pub const MAX_ROWS: usize = 100;

    /// Board with the default padding of 4 buffer rows and 4 guard columns.
    pub fn new(height: usize, width: usize) -> Result<Self, BoardError> {
        Self::with_padding(height, width, Self::DEFAULT_PADDING, Self::DEFAULT_PADDING)
    }

    pub fn with_padding(
        height: usize,
        width: usize,
        padding_rows: usize,
        padding_cols: usize,
    ) -> Result<Self, BoardError> {
        if height == 0 || width == 0 {
            return Err(BoardError::Empty { height, width });
        }
        let bits = width + 2 * padding_cols;
        let word_size = WordSize::for_bits(bits).ok_or(BoardError::TooWide {
            width,
            padding_cols,
            bits,
        })?;
        let rows = padding_rows + height;
        if rows > Self::MAX_ROWS {
            return Err(BoardError::TooTall {
                rows,
                max: Self::MAX_ROWS,
            });
        }
        Ok(Self::alloc(height, width, padding_rows, padding_cols, word_size))
    }

    /// Board filled from text rows aligned to the bottom of the cell rows; rows
    /// above the given ones stay empty. See [`Cell::from_char`].
    pub fn from_rows<S: AsRef<str>>(
        height: usize,
        width: usize,
        padding_rows: usize,
        padding_cols: usize,
        text: &[S],
    ) -> Result<Self, BoardError> {
        let mut board = Self::with_padding(height, width, padding_rows, padding_cols)?;
        let capacity = board.total_rows();
        if text.len() > capacity {
            return Err(BoardError::TooManyRows {
                found: text.len(),
                capacity,
            });
        }
        let offset = capacity - text.len();
        for (i, line) in text.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(BoardError::RowWidth {
                    row: i,
                    found,
                    expected: width,
                });
            }
            for (col, c) in line.chars().enumerate() {
                board.write_cell(offset + i, col, Cell::from_char(c));
            }
        }
        Ok(board)
    }

    fn alloc(
        height: usize,
        width: usize,
        padding_rows: usize,
        padding_cols: usize,
        word_size: WordSize,
    ) -> Self {
        let total_width = width + 2 * padding_cols;
        let full_row = u64::MAX >> (64 - total_width);
        let field_mask = (u64::MAX >> (64 - width)) << padding_cols;
        let empty_row = full_row & !field_mask;
        let cell_rows = padding_rows + height;

        let mut rows = vec![empty_row; cell_rows];
        rows.extend(std::iter::repeat(full_row).take(padding_rows));

        Self {
            height,
            width,
            padding_rows,
            padding_cols,
            word_size,
            cells: vec![Cell::Empty; cell_rows * width],
            rows,
            empty_row,
            full_row,
        }
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn padding_rows(&self) -> usize {
        self.padding_rows
    }

    #[inline(always)]
    pub fn padding_cols(&self) -> usize {
        self.padding_cols
    }

    /// Word a guarded row would need; storage stays `u64` regardless.
    pub fn word_size(&self) -> WordSize {
        self.word_size
    }

    /// Buffer plus visible rows.
    #[inline(always)]
    pub fn total_rows(&self) -> usize {
        self.padding_rows + self.height
    }

    /// Bits per guarded row word.
    #[inline(always)]
    pub fn total_width(&self) -> usize {
        self.width + 2 * self.padding_cols
    }

    /// Cell at `(row, col)`. Panics outside the cell grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Out-of-range coordinates, negative ones included, count as occupied.
    #[inline]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || row as usize >= self.total_rows() || col as usize >= self.width {
            return true;
        }
        self.get(row as usize, col as usize).is_occupied()
    }

    /// Row word including the guard floor; `None` above row 0 or below the guard rows.
    #[inline(always)]
    pub fn row_word(&self, row: i32) -> Option<u64> {
        if row < 0 {
            return None;
        }
        self.rows.get(row as usize).copied()
    }

    /// All row words, guard floor included.
    pub fn row_words(&self) -> &[u64] {
        &self.rows
    }

    /// Writes one cell, keeping the row word in step. Panics outside the cell grid.
    pub fn write_cell(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(col < self.width, "column {col} outside board");
        self.cells[row * self.width + col] = cell;
        let bit = 1u64 << (self.padding_cols + col);
        if cell.is_occupied() {
            self.rows[row] |= bit;
        } else {
            self.rows[row] &= !bit;
        }
    }

    /// Every non-guard cell of a cell row is occupied.
    #[inline]
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.total_rows() && self.rows[row] == self.full_row
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        row < self.total_rows() && self.rows[row] == self.empty_row
    }

    /// Removes the given cell rows, shifts everything above them down and
    /// refills the top with empty rows. Only rows `0..=lowest removed` change.
    pub fn remove_rows(&mut self, removed: &[usize]) {
        let Some(&lowest) = removed.iter().max() else {
            return;
        };
        let mut dst = lowest;
        let mut remaining = lowest + 1;
        for src in (0..=lowest).rev() {
            if removed.contains(&src) {
                continue;
            }
            if src != dst {
                self.copy_row(src, dst);
            }
            remaining -= 1;
            dst = dst.saturating_sub(1);
        }
        for row in 0..remaining {
            self.clear_row(row);
        }
    }

    fn copy_row(&mut self, src: usize, dst: usize) {
        let w = self.width;
        self.cells.copy_within(src * w..(src + 1) * w, dst * w);
        self.rows[dst] = self.rows[src];
    }

    fn clear_row(&mut self, row: usize) {
        let w = self.width;
        self.cells[row * w..(row + 1) * w].fill(Cell::Empty);
        self.rows[row] = self.empty_row;
    }

    /// Any block in the hidden buffer rows.
    pub fn is_game_over(&self) -> bool {
        self.rows[..self.padding_rows]
            .iter()
            .any(|&word| word != self.empty_row)
    }

    /// No occupied cell anywhere (perfect clear).
    pub fn is_empty(&self) -> bool {
        self.rows[..self.total_rows()]
            .iter()
            .all(|&word| word == self.empty_row)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// One string per cell row, top first.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.to_rows().iter().enumerate() {
            if row == self.padding_rows && row > 0 {
                writeln!(f, "{}", "-".repeat(self.width))?;
            }
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct BoardRepr {
    height: usize,
    width: usize,
    padding_rows: usize,
    padding_cols: usize,
    rows: Vec<String>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            height: board.height,
            width: board.width,
            padding_rows: board.padding_rows,
            padding_cols: board.padding_cols,
            rows: board.to_rows(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::from_rows(
            repr.height,
            repr.width,
            repr.padding_rows,
            repr.padding_cols,
            &repr.rows,
        )
    }
}
