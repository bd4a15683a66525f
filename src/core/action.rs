//! Game actions

use std::fmt;

use super::board::SIZE;
use super::side::Side;

/// A concrete action produced by an agent.
///
/// `Action::None` is the designed no-legal-move outcome, not an error;
/// under NoGo rules the player who produces it loses the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Place { pos: usize, side: Side },
    None,
}

impl Action {
    pub fn place(pos: usize, side: Side) -> Self {
        Action::Place { pos, side }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { pos, side } => {
                write!(f, "{} ({},{})", side, pos % SIZE, pos / SIZE)
            }
            Action::None => write!(f, "none"),
        }
    }
}
