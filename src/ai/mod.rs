//! Monte Carlo tree search: nodes, single trees, and the root-parallel
//! ensemble

pub mod ensemble;
pub mod mcts;
pub mod search;

pub use ensemble::{decide, default_threads, EnsembleMode, SearchOptions};
pub use mcts::{MctsEdge, MctsNode, NodeStats, Position};
pub use search::SearchTree;

use crate::core::{Board, Side, AREA};

impl Position for Board {
    fn move_space(&self) -> usize {
        AREA
    }

    fn try_move(&mut self, mv: usize) -> bool {
        self.place(mv)
    }

    fn side_to_move(&self) -> Side {
        Board::side_to_move(self)
    }
}

#[cfg(test)]
mod tests;
