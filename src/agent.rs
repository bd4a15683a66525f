//! Players: random, heuristic, and search-backed agents

use anyhow::bail;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::str::FromStr;

use crate::ai::{self, SearchOptions};
use crate::core::{Action, Board, Side, AREA, SIZE};
use crate::heuristics;
use crate::utils::make_rng;

const CENTER: usize = AREA / 2;

/// Something that can play one side of a game.
///
/// Returning `Action::None` signals that the agent has no legal move,
/// which under NoGo rules loses the game.
pub trait Agent {
    fn name(&self) -> &str;

    fn side(&self) -> Side;

    fn take_action(&mut self, board: &Board) -> Action;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Random,
    Heuristic,
    Mcts,
}

impl FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(AgentKind::Random),
            "heuristic" => Ok(AgentKind::Heuristic),
            "mcts" => Ok(AgentKind::Mcts),
            _ => bail!("Unknown agent kind: {}", s),
        }
    }
}

pub fn build_agent(kind: AgentKind, side: Side, options: &SearchOptions) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::new(side)),
        AgentKind::Heuristic => Box::new(HeuristicAgent::new(side)),
        AgentKind::Mcts => Box::new(MctsAgent::new(side, options.clone())),
    }
}

/// Puts a legal stone uniformly at random
pub struct RandomAgent {
    side: Side,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            rng: make_rng(),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn take_action(&mut self, board: &Board) -> Action {
        let mut moves: Vec<usize> = (0..AREA).collect();
        moves.shuffle(&mut self.rng);
        for pos in moves {
            if board.legal(pos, self.side) {
                return Action::place(pos, self.side);
            }
        }
        Action::None
    }
}

/// Greedy player over the static positional scores, with a fixed
/// preference for the center point early on
pub struct HeuristicAgent {
    side: Side,
    rng: StdRng,
}

impl HeuristicAgent {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            rng: make_rng(),
        }
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn take_action(&mut self, board: &Board) -> Action {
        if self.side == Side::Black && board.legal(CENTER, self.side) {
            return Action::place(CENTER, self.side);
        }

        let mut moves: Vec<usize> = (0..AREA).collect();
        moves.shuffle(&mut self.rng);

        let mut best: Option<(usize, i32)> = None;
        for pos in moves {
            if !board.legal(pos, self.side) {
                continue;
            }
            let score = heuristics::action_value(board, pos, self.side);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((pos, score));
            }
        }

        let Some((pos, _)) = best else {
            return Action::None;
        };

        // away from the edge midpoints, still prefer the center if open
        if !is_edge_midpoint(pos) && board.legal(CENTER, self.side) {
            return Action::place(CENTER, self.side);
        }
        Action::place(pos, self.side)
    }
}

fn is_edge_midpoint(pos: usize) -> bool {
    let (x, y) = (pos % SIZE, pos / SIZE);
    let half = SIZE / 2;
    (x == half && (y == 0 || y == SIZE - 1)) || (y == half && (x == 0 || x == SIZE - 1))
}

/// Player backed by the root-parallel search ensemble
pub struct MctsAgent {
    side: Side,
    options: SearchOptions,
}

impl MctsAgent {
    pub fn new(side: Side, options: SearchOptions) -> Self {
        Self { side, options }
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        "mcts"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn take_action(&mut self, board: &Board) -> Action {
        match ai::decide(board, &self.options) {
            Some(pos) => Action::place(pos, board.side_to_move()),
            None => Action::None,
        }
    }
}
