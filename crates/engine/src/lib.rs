//! blockfall-engine - movement rules and placement search.
//!
//! Provides SRS kicks with dedicated 180° tables, bitword collision,
//! lock and line clear, exhaustive and fast placement search, and a seeded
//! game model built on top of them.

pub mod apply;
pub mod bag;
pub mod collision;
pub mod config;
pub mod game;
pub mod kicks;
pub mod movegen;
pub mod movegen_fast;
pub mod movement;
pub mod perft;
pub mod replay;

pub use apply::{apply_placement, lock_piece, LockOutcome};
pub use bag::SevenBag;
pub use collision::{at_bottom, check_validity, check_validity_naive, drop_distance, hard_drop};
pub use config::{BoardConfig, GameConfig, RotationTrigger, SearchConfig, SearchStrategy};
pub use game::{Game, GameError, StepOutcome};
pub use kicks::{get_kicks, KickClass};
pub use movegen::{generate_placements, search};
pub use movegen_fast::generate_placements_fast;
pub use movement::{
    classify_spin, rotate, try_move, try_rotate, try_shift, try_step_down, RotationResult,
};
pub use perft::{perft, perft_divide, perft_with};
#[cfg(feature = "rayon")]
pub use perft::perft_parallel;
pub use replay::{replay, ReplayError};
