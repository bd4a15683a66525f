//! Search tree nodes and their visit statistics

use std::collections::VecDeque;

use rand::prelude::*;

use crate::core::Side;

/// Position as seen by the search engine.
///
/// The engine only needs to apply candidate moves, enumerate the fixed
/// move space, and know whose turn it is; the rules themselves stay with
/// the implementor. Copies are taken on every expansion and every
/// simulation step, so cloning must be cheap.
pub trait Position: Clone + Send {
    /// Size of the fixed move space (one entry per board cell)
    fn move_space(&self) -> usize;

    /// Apply a move if legal; an illegal move leaves the state untouched
    fn try_move(&mut self, mv: usize) -> bool;

    /// Side to move in this position
    fn side_to_move(&self) -> Side;
}

/// Visit/score statistics for one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub visits: u32,
    /// Signed accumulator: +1 when a finished simulation's winner differs
    /// from the side to move at this node, -1 otherwise. The resulting
    /// "win rate" is a net-advantage rate, not a probability; inherited
    /// behavior, kept as is.
    pub score: i32,
}

impl NodeStats {
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.score as f64 / self.visits as f64
    }

    /// UCB1 with the net-advantage rate as the exploitation term.
    /// Falls back to the bare rate while this node or its parent is
    /// unvisited.
    pub fn selection_score(&self, parent_visits: u32, c: f64) -> f64 {
        if parent_visits == 0 || self.visits == 0 {
            return self.win_rate();
        }
        self.win_rate() + c * ((parent_visits as f64).ln() / self.visits as f64).sqrt()
    }

    pub fn record(&mut self, winner: Side, to_move: Side) {
        self.visits += 1;
        if winner != to_move {
            self.score += 1;
        } else {
            self.score -= 1;
        }
    }
}

/// Edge from a node to the child reached by `mv`
pub struct MctsEdge<P: Position> {
    pub mv: usize,
    pub node: MctsNode<P>,
}

/// One position in one search tree; owns its children exclusively.
/// Edges keep expansion order, which gives the deterministic
/// first-encountered tie-break during selection and move choice.
pub struct MctsNode<P: Position> {
    pub stats: NodeStats,
    pub state: P,
    pub edges: Vec<MctsEdge<P>>,
}

impl<P: Position> MctsNode<P> {
    pub fn new(state: P) -> Self {
        Self {
            stats: NodeStats::default(),
            state,
            edges: Vec::new(),
        }
    }

    pub fn legal_moves(&self) -> usize {
        (0..self.state.move_space())
            .filter(|&mv| {
                let mut next = self.state.clone();
                next.try_move(mv)
            })
            .count()
    }

    /// Fully expanded: at least one legal move and a child for each.
    /// The negation is the engine's "leaf" test: a node stays expandable
    /// while some legal move has no child yet.
    pub fn fully_expanded(&self) -> bool {
        let legal = self.legal_moves();
        legal > 0 && self.edges.len() == legal
    }

    pub fn has_child(&self, mv: usize) -> bool {
        self.edges.iter().any(|edge| edge.mv == mv)
    }

    /// Edge index of the child with the best selection score, first
    /// encountered winning ties; `None` for a childless node.
    pub fn select_child(&self, c: f64) -> Option<usize> {
        let parent_visits = self.stats.visits;
        let mut best: Option<(usize, f64)> = None;
        for (i, edge) in self.edges.iter().enumerate() {
            let score = edge.node.stats.selection_score(parent_visits, c);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Attach a child for the first shuffled move that is legal and not
    /// expanded yet; returns its edge index. `None` when every legal
    /// move already has a child (defensive; the expandable test should
    /// rule this out) or no move is legal.
    pub fn expand(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let mut moves: Vec<usize> = (0..self.state.move_space()).collect();
        moves.shuffle(rng);

        for mv in moves {
            if self.has_child(mv) {
                continue;
            }
            let mut next = self.state.clone();
            if next.try_move(mv) {
                self.edges.push(MctsEdge {
                    mv,
                    node: MctsNode::new(next),
                });
                return Some(self.edges.len() - 1);
            }
        }
        None
    }

    /// Uniform-random playout from this node's position. Moves are tried
    /// in shuffled order; a successful placement consumes the move, an
    /// illegal one is retried later. A full pass with no placement means
    /// nobody can move, and the side to move at that point loses.
    pub fn simulate(&self, rng: &mut impl Rng) -> Side {
        let mut state = self.state.clone();

        let mut moves: Vec<usize> = (0..state.move_space()).collect();
        moves.shuffle(rng);
        let mut queue: VecDeque<usize> = moves.into();

        let mut misses = 0;
        while misses != queue.len() {
            let Some(mv) = queue.pop_front() else {
                break;
            };
            if state.try_move(mv) {
                misses = 0;
            } else {
                queue.push_back(mv);
                misses += 1;
            }
        }

        !state.side_to_move()
    }

    /// Move of the most-visited child, first encountered winning ties
    pub fn best_move(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for edge in &self.edges {
            let visits = edge.node.stats.visits;
            if best.map_or(true, |(_, b)| visits > b) {
                best = Some((edge.mv, visits));
            }
        }
        best.map(|(mv, _)| mv)
    }
}
