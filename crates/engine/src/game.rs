//! Deterministic game model: current piece, hold, 7-bag queue and locking.
//! Timing (gravity intervals, lock delay) is left to the caller, which feeds
//! auto-descent in as `ActionSource::Gravity` steps.

use blockfall_core::{
    Action, ActionKind, ActionSource, Board, BoardError, CollisionError, GameState, Piece,
    PieceKind, Placement, SpinType,
};
use thiserror::Error;
use tracing::debug;

use crate::apply::{lock_piece, LockOutcome};
use crate::bag::SevenBag;
use crate::collision::{check_validity, hard_drop};
use crate::config::GameConfig;
use crate::movement::{classify_spin, try_move, try_rotate, try_step_down};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
    #[error(transparent)]
    Collision(#[from] CollisionError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The current piece moved or rotated.
    Moved,
    /// Blocked move, unavailable swap or no-op.
    Unchanged,
    Swapped,
    Locked { outcome: LockOutcome, spin: SpinType },
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: Piece,
    hold: Option<PieceKind>,
    can_swap: bool,
    bag: SevenBag,
    preview: usize,
    game_over: bool,
    last_action: ActionKind,
    pieces_placed: u32,
    lines_cleared: u32,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, BoardError> {
        let board = config.board.build()?;
        Ok(Self::with_board(board, config.seed, config.preview))
    }

    pub fn with_board(board: Board, seed: u64, preview: usize) -> Self {
        let mut bag = SevenBag::new(seed);
        let current = Piece::spawn(bag.next_piece(), &board);
        let game_over = !check_validity(&board, &current, (0, 0));
        Self {
            board,
            current,
            hold: None,
            can_swap: true,
            bag,
            preview,
            game_over,
            last_action: ActionKind::None,
            pieces_placed: 0,
            lines_cleared: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_swap(&self) -> bool {
        self.can_swap
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Snapshot for placement search.
    pub fn snapshot(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            current: Some(self.current),
            hold: self.hold,
            can_swap: self.can_swap,
            queue: self.bag.preview().take(self.preview).collect(),
            game_over: self.game_over,
        }
    }

    /// Executes one action. A gravity step that cannot descend locks the
    /// piece; a player step that cannot descend changes nothing.
    pub fn apply(&mut self, action: Action) -> Result<StepOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        let moved = match action.kind {
            ActionKind::None => None,
            ActionKind::StepDown => match try_step_down(&self.board, &self.current) {
                Some(next) => Some(next),
                None if action.source == ActionSource::Gravity => return self.lock(),
                None => None,
            },
            ActionKind::StepLeft => try_move(&self.board, &self.current, -1),
            ActionKind::StepRight => try_move(&self.board, &self.current, 1),
            ActionKind::SoftDrop => {
                Some(hard_drop(&self.board, &self.current)).filter(|p| *p != self.current)
            }
            ActionKind::HardDrop => {
                let landed = hard_drop(&self.board, &self.current);
                if landed != self.current {
                    self.current = landed;
                    self.last_action = ActionKind::HardDrop;
                }
                return self.lock();
            }
            ActionKind::Rotate(turn) => {
                try_rotate(&self.board, &self.current, turn).map(|r| r.piece)
            }
            ActionKind::Swap => return Ok(self.swap()),
        };

        Ok(match moved {
            Some(next) => {
                self.current = next;
                self.last_action = action.kind;
                StepOutcome::Moved
            }
            None => StepOutcome::Unchanged,
        })
    }

    /// Applies every action of a search result; returns the last outcome.
    pub fn play(&mut self, placement: &Placement) -> Result<StepOutcome, GameError> {
        let mut last = StepOutcome::Unchanged;
        for &action in placement.path.iter() {
            last = self.apply(action)?;
        }
        Ok(last)
    }

    fn lock(&mut self) -> Result<StepOutcome, GameError> {
        let spin = classify_spin(&self.board, &self.current, self.last_action);
        let outcome = lock_piece(&mut self.board, &self.current)?;
        self.pieces_placed += 1;
        self.lines_cleared += outcome.lines_cleared() as u32;
        self.can_swap = true;
        self.last_action = ActionKind::None;

        if outcome.game_over {
            self.game_over = true;
            debug!(pieces = self.pieces_placed, "game over: buffer occupied");
        } else {
            let kind = self.bag.next_piece();
            self.spawn(kind);
        }
        Ok(StepOutcome::Locked { outcome, spin })
    }

    fn swap(&mut self) -> StepOutcome {
        if !self.can_swap {
            return StepOutcome::Unchanged;
        }
        let next = match self.hold.replace(self.current.kind) {
            Some(held) => held,
            None => self.bag.next_piece(),
        };
        self.can_swap = false;
        self.last_action = ActionKind::None;
        self.spawn(next);
        StepOutcome::Swapped
    }

    fn spawn(&mut self, kind: PieceKind) {
        self.current = Piece::spawn(kind, &self.board);
        if !check_validity(&self.board, &self.current, (0, 0)) {
            self.game_over = true;
            debug!(%kind, "game over: spawn blocked");
        }
    }
}
