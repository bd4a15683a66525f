use anyhow::{bail, Result};

use super::options::EngineOptions;
use crate::ai;
use crate::core::{Action, Board};

/// Engine manages the game state and produces moves for the side to play
pub struct Engine {
    pub board: Board,
    pub options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            board: Board::new(),
            options,
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.options.set_option(name, value)
    }

    /// Run the search ensemble against the current position and wrap the
    /// chosen cell with the mover's identity; `Action::None` when the
    /// side to move has no legal placement.
    pub fn decide(&self) -> Action {
        match ai::decide(&self.board, &self.options.search) {
            Some(pos) => Action::place(pos, self.board.side_to_move()),
            None => Action::None,
        }
    }

    pub fn play(&mut self, action: Action) -> Result<()> {
        match action {
            Action::None => bail!("no action to play"),
            Action::Place { pos, side } => {
                if side != self.board.side_to_move() {
                    bail!("not {}'s turn", side);
                }
                if !self.board.place(pos) {
                    bail!("illegal move at {}", pos);
                }
                Ok(())
            }
        }
    }

    pub fn display(&self) {
        println!("{}", self.board);
    }
}
