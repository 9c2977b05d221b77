//! blockfall core crate - board, piece catalog and action types.

mod board;
mod error;
mod moves;
mod piece;
mod state;

pub use board::{Board, Cell, WordSize};
pub use error::{BoardError, CollisionError};
pub use moves::{Action, ActionKind, ActionPath, ActionSource, Placement, SpinType};
pub use piece::{ParsePieceError, Piece, PieceKind, Rotation, Shape, Turn};
pub use state::GameState;
