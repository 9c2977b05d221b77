//! Game state snapshot handed to placement search.

use crate::{Board, Piece, PieceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current: Option<Piece>,
    pub hold: Option<PieceKind>,
    pub can_swap: bool,
    pub queue: Vec<PieceKind>,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::default(),
            current: None,
            hold: None,
            can_swap: true,
            queue: Vec::new(),
            game_over: false,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the first queued kind as the current piece.
    pub fn with_queue(board: Board, queue: Vec<PieceKind>) -> Self {
        let mut queue = queue.into_iter();
        let current = queue.next().map(|kind| Piece::spawn(kind, &board));
        Self {
            board,
            current,
            queue: queue.collect(),
            ..Self::default()
        }
    }

    /// Kind the current piece would become after a swap.
    pub fn swap_kind(&self) -> Option<PieceKind> {
        self.hold.or_else(|| self.queue.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rotation;

    #[test]
    fn test_default_state() {
        let s = GameState::new();
        assert!(s.current.is_none());
        assert!(s.hold.is_none());
        assert!(s.can_swap);
        assert!(!s.game_over);
    }

    #[test]
    fn test_with_queue() {
        let s = GameState::with_queue(
            Board::default(),
            vec![PieceKind::T, PieceKind::I, PieceKind::O],
        );
        assert_eq!(
            s.current,
            Some(Piece::new(PieceKind::T, 1, 3, Rotation::North))
        );
        assert_eq!(s.queue, [PieceKind::I, PieceKind::O]);
    }

    #[test]
    fn test_swap_kind_prefers_hold() {
        let mut s = GameState::with_queue(Board::default(), vec![PieceKind::T, PieceKind::I]);
        assert_eq!(s.swap_kind(), Some(PieceKind::I));
        s.hold = Some(PieceKind::Z);
        assert_eq!(s.swap_kind(), Some(PieceKind::Z));
    }
}
