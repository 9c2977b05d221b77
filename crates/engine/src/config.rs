use blockfall_core::{Board, BoardError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
    pub padding_rows: usize,
    pub padding_cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: Board::DEFAULT_HEIGHT,
            width: Board::DEFAULT_WIDTH,
            padding_rows: Board::DEFAULT_PADDING,
            padding_cols: Board::DEFAULT_PADDING,
        }
    }
}

impl BoardConfig {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Result<Board, BoardError> {
        Board::with_padding(self.height, self.width, self.padding_rows, self.padding_cols)
    }

    /// Board with text rows aligned to the floor.
    pub fn build_from_rows<S: AsRef<str>>(&self, rows: &[S]) -> Result<Board, BoardError> {
        Board::from_rows(
            self.height,
            self.width,
            self.padding_rows,
            self.padding_cols,
            rows,
        )
    }
}

/// When the exhaustive search expands rotations from a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationTrigger {
    /// From every node.
    #[default]
    Always,
    /// Only when the piece frame touches an occupied or out-of-range cell.
    PossibleContact,
    /// Only when the piece cannot step down.
    AtBottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    #[default]
    Exhaustive,
    Fast,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    pub rotation_trigger: RotationTrigger,
    /// Fast search: try the floor rotations for every kind, not only T.
    pub post_drop_rotations: bool,
}

impl SearchConfig {
    pub fn exhaustive() -> Self {
        Self::default()
    }

    pub fn fast() -> Self {
        Self {
            strategy: SearchStrategy::Fast,
            ..Self::default()
        }
    }

    pub fn with_trigger(mut self, rotation_trigger: RotationTrigger) -> Self {
        self.rotation_trigger = rotation_trigger;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub seed: u64,
    /// Queued kinds exposed in snapshots.
    pub preview: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            seed: 0,
            preview: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_config_builds() {
        let board = BoardConfig::default().build().unwrap();
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_board_config_propagates_error() {
        let config = BoardConfig {
            width: 70,
            ..BoardConfig::default()
        };
        assert!(matches!(config.build(), Err(BoardError::TooWide { .. })));
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, SearchStrategy::Exhaustive);
        assert_eq!(config.rotation_trigger, RotationTrigger::Always);
        assert!(!config.post_drop_rotations);
        assert_eq!(SearchConfig::fast().strategy, SearchStrategy::Fast);
    }
}
