//! Action vocabulary, action paths and search results.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Piece, Turn};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum SpinType {
    #[default]
    None,
    Mini,
    Full,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    None,
    StepDown,
    StepLeft,
    StepRight,
    /// Drop to the floor without locking.
    SoftDrop,
    /// Drop to the floor and lock.
    HardDrop,
    Rotate(Turn),
    Swap,
}

/// Who issued an action: a player/agent decision or auto-descent.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum ActionSource {
    #[default]
    Player,
    Gravity,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub source: ActionSource,
}

impl ActionKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ActionKind::None => "-",
            ActionKind::StepDown => "D",
            ActionKind::StepLeft => "L",
            ActionKind::StepRight => "R",
            ActionKind::SoftDrop => "S",
            ActionKind::HardDrop => "H",
            ActionKind::Rotate(Turn::Quarter) => "r1",
            ActionKind::Rotate(Turn::Half) => "r2",
            ActionKind::Rotate(Turn::ThreeQuarter) => "r3",
            ActionKind::Swap => "X",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Action {
    pub const fn player(kind: ActionKind) -> Self {
        Self {
            kind,
            source: ActionSource::Player,
        }
    }

    pub const fn gravity(kind: ActionKind) -> Self {
        Self {
            kind,
            source: ActionSource::Gravity,
        }
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self::player(kind)
    }
}

/// Ordered actions that take a spawned piece to its final position.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPath(SmallVec<[Action; 16]>);

impl ActionPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: impl Into<Action>) {
        self.0.push(action.into());
    }

    /// Copy of this path with one more action.
    pub fn with(&self, action: impl Into<Action>) -> Self {
        let mut next = self.clone();
        next.push(action);
        next
    }

    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.0.iter().map(|a| a.kind)
    }

    /// Drops redundant actions without changing where the path ends:
    /// adjacent left/right pairs cancel (cascading) and soft drops or
    /// single steps down right before a hard drop disappear.
    pub fn cleaned(&self) -> Self {
        let mut out: SmallVec<[Action; 16]> = SmallVec::new();
        for &action in &self.0 {
            let last = out.last().map(|a| a.kind);
            if matches!(
                (last, action.kind),
                (Some(ActionKind::StepLeft), ActionKind::StepRight)
                    | (Some(ActionKind::StepRight), ActionKind::StepLeft)
            ) {
                out.pop();
                continue;
            }
            if action.kind == ActionKind::HardDrop {
                while matches!(
                    out.last().map(|a| a.kind),
                    Some(ActionKind::SoftDrop | ActionKind::StepDown)
                ) {
                    out.pop();
                }
            }
            out.push(action);
        }
        Self(out)
    }
}

impl Deref for ActionPath {
    type Target = [Action];

    fn deref(&self) -> &[Action] {
        &self.0
    }
}

impl FromIterator<ActionKind> for ActionPath {
    fn from_iter<T: IntoIterator<Item = ActionKind>>(iter: T) -> Self {
        Self(iter.into_iter().map(Action::player).collect())
    }
}

impl FromIterator<Action> for ActionPath {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.kinds().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(kind.symbol())?;
        }
        Ok(())
    }
}

/// A reachable final position and one path that reaches it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub path: ActionPath,
    pub spin: SpinType,
}

impl Placement {
    pub fn new(piece: Piece, path: ActionPath) -> Self {
        Self {
            piece,
            path,
            spin: SpinType::None,
        }
    }

    pub fn with_spin(mut self, spin: SpinType) -> Self {
        self.spin = spin;
        self
    }

    /// Single-action swap result.
    pub fn is_swap(&self) -> bool {
        self.path.first().map(|a| a.kind) == Some(ActionKind::Swap)
    }
}
