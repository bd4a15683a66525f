use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ensemble::{argmax_first, top_two, visit_tally};
use super::{decide, EnsembleMode, NodeStats, Position, SearchOptions, SearchTree};
use crate::core::{Board, Side};

/// Take-away toy game with a fully predictable outcome: move `i` is
/// legal while `i < remaining`, every move removes one token, and the
/// player left without a move loses. The winner from any position
/// depends only on the parity of `remaining`.
#[derive(Clone, Copy)]
struct TakeAway {
    remaining: u32,
    to_move: Side,
}

impl TakeAway {
    fn new(remaining: u32) -> Self {
        Self {
            remaining,
            to_move: Side::Black,
        }
    }
}

impl Position for TakeAway {
    fn move_space(&self) -> usize {
        3
    }

    fn try_move(&mut self, mv: usize) -> bool {
        if (mv as u32) >= self.remaining.min(3) {
            return false;
        }
        self.remaining -= 1;
        self.to_move = !self.to_move;
        true
    }

    fn side_to_move(&self) -> Side {
        self.to_move
    }
}

fn options(mode: EnsembleMode, simulations: u32, threads: usize) -> SearchOptions {
    SearchOptions {
        simulations,
        exploration: 0.5,
        threads,
        mode,
        early_exit_margin: 0.5,
        seed: Some(17),
    }
}

#[test]
fn test_root_visits_equal_iterations() {
    let mut tree = SearchTree::new(TakeAway::new(6), 0.5, StdRng::seed_from_u64(1));
    tree.run(137);
    assert_eq!(tree.root().stats.visits, 137);
}

#[test]
fn test_backprop_sign_rule_mover_wins() {
    // one token left: black takes it and always wins
    let mut tree = SearchTree::new(TakeAway::new(1), 0.5, StdRng::seed_from_u64(2));
    tree.run(10);

    let root = tree.root();
    assert_eq!(root.stats.visits, 10);
    assert_eq!(root.stats.score, -10);

    assert_eq!(root.edges.len(), 1);
    let child = &root.edges[0].node;
    assert_eq!(child.stats.visits, 10);
    assert_eq!(child.stats.score, 10);
}

#[test]
fn test_backprop_sign_rule_mover_loses() {
    // two tokens: whoever moves first loses
    let mut tree = SearchTree::new(TakeAway::new(2), 0.5, StdRng::seed_from_u64(3));
    tree.run(30);

    let root = tree.root();
    assert_eq!(root.stats.score, 30);
    for edge in &root.edges {
        let stats = edge.node.stats;
        assert_eq!(stats.score, -(stats.visits as i32));
    }
}

#[test]
fn test_budget_zero_returns_none() {
    for mode in [
        EnsembleMode::SingleTree,
        EnsembleMode::Average,
        EnsembleMode::MajorityVote,
    ] {
        assert_eq!(decide(&TakeAway::new(5), &options(mode, 0, 2)), None);
    }
}

#[test]
fn test_no_legal_move_returns_none() {
    for mode in [
        EnsembleMode::SingleTree,
        EnsembleMode::Average,
        EnsembleMode::MajorityVote,
    ] {
        assert_eq!(decide(&TakeAway::new(0), &options(mode, 100, 2)), None);
    }
}

#[test]
fn test_single_legal_move_is_chosen() {
    for budget in [1, 7, 100] {
        for mode in [
            EnsembleMode::SingleTree,
            EnsembleMode::Average,
            EnsembleMode::MajorityVote,
        ] {
            assert_eq!(
                decide(&TakeAway::new(1), &options(mode, budget, 2)),
                Some(0)
            );
        }
    }
}

#[test]
fn test_majority_vote_unanimous() {
    // every full-budget tree can only ever recommend the single legal move
    let opts = options(EnsembleMode::MajorityVote, 200, 4);
    assert_eq!(decide(&TakeAway::new(1), &opts), Some(0));
}

#[test]
fn test_average_mode_early_exit_lead() {
    // a single candidate builds an insurmountable lead immediately; the
    // round loop must still land on it
    let opts = options(EnsembleMode::Average, 5000, 2);
    assert_eq!(decide(&TakeAway::new(1), &opts), Some(0));
}

#[test]
fn test_deterministic_with_fixed_seed() {
    let board = Board::new();
    let opts = options(EnsembleMode::SingleTree, 300, 1);
    let first = decide(&board, &opts);
    let second = decide(&board, &opts);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_tally_sums_tree_visits() {
    let mut trees: Vec<SearchTree<TakeAway>> = (0..3)
        .map(|i| SearchTree::new(TakeAway::new(9), 0.5, StdRng::seed_from_u64(i)))
        .collect();
    for (i, tree) in trees.iter_mut().enumerate() {
        tree.run(50 + 25 * i as u32);
    }

    let tally = visit_tally(&trees, 3);
    for mv in 0..3 {
        let expected: u32 = trees
            .iter()
            .map(|tree| {
                tree.root()
                    .edges
                    .iter()
                    .filter(|edge| edge.mv == mv)
                    .map(|edge| edge.node.stats.visits)
                    .sum::<u32>()
            })
            .sum();
        assert_eq!(tally[mv], expected);
    }
}

#[test]
fn test_selection_score_unvisited() {
    let stats = NodeStats::default();
    assert_eq!(stats.win_rate(), 0.0);
    assert_eq!(stats.selection_score(10, 1.0), 0.0);

    let visited = NodeStats {
        visits: 4,
        score: 2,
    };
    // unvisited parent falls back to the bare rate
    assert_eq!(visited.selection_score(0, 1.0), 0.5);
    // UCB1 exploration bonus on top of the rate
    let score = visited.selection_score(8, 1.0);
    let expected = 0.5 + ((8f64).ln() / 4.0).sqrt();
    assert!((score - expected).abs() < 1e-12);
}

#[test]
fn test_top_two_and_argmax() {
    assert_eq!(top_two(&[3, 9, 1, 9]), (9, 9));
    assert_eq!(top_two(&[4, 0, 0]), (4, 0));
    assert_eq!(top_two(&[0, 0]), (0, 0));

    assert_eq!(argmax_first(&[0, 5, 5]), Some(1));
    assert_eq!(argmax_first(&[0, 0, 0]), None);
    assert_eq!(argmax_first(&[2, 7, 1]), Some(1));
}

#[test]
fn test_simulation_declares_stuck_player_loser() {
    let mut rng = StdRng::seed_from_u64(5);

    // one token: black takes it, white is stuck
    let node = super::MctsNode::new(TakeAway::new(1));
    assert_eq!(node.simulate(&mut rng), Side::Black);

    // no tokens: black is stuck immediately
    let node = super::MctsNode::new(TakeAway::new(0));
    assert_eq!(node.simulate(&mut rng), Side::White);
}

#[test]
fn test_expand_skips_existing_children() {
    let mut node = super::MctsNode::new(TakeAway::new(9));
    let mut rng = StdRng::seed_from_u64(6);

    assert!(!node.fully_expanded());
    for _ in 0..3 {
        assert!(node.expand(&mut rng).is_some());
    }
    assert!(node.fully_expanded());
    // all legal moves already expanded: defensive no-op
    assert!(node.expand(&mut rng).is_none());

    let mut moves: Vec<usize> = node.edges.iter().map(|e| e.mv).collect();
    moves.sort_unstable();
    assert_eq!(moves, vec![0, 1, 2]);
}
