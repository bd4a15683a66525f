//! Game rules: board, sides, and actions

pub mod action;
pub mod board;
pub mod side;

pub use action::Action;
pub use board::{Board, AREA, SIZE};
pub use side::Side;
