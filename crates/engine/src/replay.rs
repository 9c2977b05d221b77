//! Replays an action path against a fixed board without locking.

use blockfall_core::{ActionKind, Board, Piece};
use thiserror::Error;

use crate::collision::hard_drop;
use crate::movement::{try_move, try_rotate, try_step_down};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("action {index} is a swap, which needs a game state rather than a board")]
    Swap { index: usize },
}

/// Final piece after applying `path` to `piece`. Blocked moves and rotations
/// leave the piece where it is; both drops fall to the floor.
pub fn replay<I>(board: &Board, mut piece: Piece, path: I) -> Result<Piece, ReplayError>
where
    I: IntoIterator<Item = ActionKind>,
{
    for (index, kind) in path.into_iter().enumerate() {
        piece = match kind {
            ActionKind::None => piece,
            ActionKind::StepDown => try_step_down(board, &piece).unwrap_or(piece),
            ActionKind::StepLeft => try_move(board, &piece, -1).unwrap_or(piece),
            ActionKind::StepRight => try_move(board, &piece, 1).unwrap_or(piece),
            ActionKind::SoftDrop | ActionKind::HardDrop => hard_drop(board, &piece),
            ActionKind::Rotate(turn) => try_rotate(board, &piece, turn).map_or(piece, |r| r.piece),
            ActionKind::Swap => return Err(ReplayError::Swap { index }),
        };
    }
    Ok(piece)
}
