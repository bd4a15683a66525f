//! Root-parallel ensemble: several independent trees from the same
//! position, periodically aggregated at the root's children.
//!
//! Independent trees cannot be merged below the root without locking
//! shared nodes; summing visit counts over the root's children after a
//! fork-join round combines the trees lock-free, and the margin test
//! stops scheduling further rounds once one move holds an insurmountable
//! lead.

use std::str::FromStr;
use std::thread;

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::mcts::Position;
use super::search::SearchTree;
use crate::utils::make_rng;

/// How independent trees are combined into one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsembleMode {
    /// Synchronized rounds, per-move visit tally, early exit
    Average,
    /// Each tree searches the full budget alone and casts one vote
    MajorityVote,
    /// Degenerate case: one tree, full budget, no parallelism
    SingleTree,
}

impl FromStr for EnsembleMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "average" => Ok(EnsembleMode::Average),
            "majority" | "majority-vote" => Ok(EnsembleMode::MajorityVote),
            "single" | "single-tree" => Ok(EnsembleMode::SingleTree),
            _ => bail!("Unknown ensemble mode: {}", s),
        }
    }
}

/// Options for one ensemble decision
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Simulation budget per tree
    pub simulations: u32,
    /// UCB exploration constant
    pub exploration: f64,
    /// Number of trees, one per worker thread
    pub threads: usize,
    pub mode: EnsembleMode,
    /// Lead required, as a fraction of the remaining total budget, for
    /// the average mode to stop scheduling rounds
    pub early_exit_margin: f64,
    /// Master seed; `None` draws one from the environment
    pub seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            simulations: 10_000,
            exploration: 0.5,
            threads: default_threads(),
            mode: EnsembleMode::Average,
            early_exit_margin: 0.5,
            seed: None,
        }
    }
}

pub fn default_threads() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            bail!("threads must be at least 1");
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            bail!("invalid exploration constant: {}", self.exploration);
        }
        if !self.early_exit_margin.is_finite() || self.early_exit_margin < 0.0 {
            bail!("invalid early exit margin: {}", self.early_exit_margin);
        }
        Ok(())
    }

    fn master_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => make_rng(),
        }
    }
}

/// Run one ensemble decision against `position`. `None` means no legal
/// move. Every tree is built fresh here and dropped before returning.
pub fn decide<P: Position>(position: &P, options: &SearchOptions) -> Option<usize> {
    let mut master = options.master_rng();
    let tree_count = match options.mode {
        EnsembleMode::SingleTree => 1,
        _ => options.threads,
    };

    let mut trees: Vec<SearchTree<P>> = (0..tree_count)
        .map(|_| {
            let rng = StdRng::seed_from_u64(master.next_u64());
            SearchTree::new(position.clone(), options.exploration, rng)
        })
        .collect();

    match options.mode {
        EnsembleMode::Average => average_decision(&mut trees, position.move_space(), options),
        EnsembleMode::MajorityVote => {
            majority_decision(&mut trees, position.move_space(), options.simulations)
        }
        EnsembleMode::SingleTree => {
            let tree = &mut trees[0];
            tree.run(options.simulations);
            tree.best_move()
        }
    }
}

/// One fork-join block: every tree runs `iterations` on its own thread,
/// aggregation happens strictly after the join.
fn run_block<P: Position>(trees: &mut [SearchTree<P>], iterations: u32) {
    if iterations == 0 || trees.is_empty() {
        return;
    }
    thread::scope(|scope| {
        for tree in trees.iter_mut() {
            scope.spawn(move || tree.run(iterations));
        }
    });
}

/// Per-move visit tally recomputed from the live trees; visit counts
/// are cumulative, so this equals the sum over all trees and all rounds.
pub(crate) fn visit_tally<P: Position>(trees: &[SearchTree<P>], move_space: usize) -> Vec<u32> {
    let mut tally = vec![0u32; move_space];
    for tree in trees {
        tree.add_visits(&mut tally);
    }
    tally
}

pub(crate) fn top_two(tally: &[u32]) -> (u32, u32) {
    let mut max1 = 0;
    let mut max2 = 0;
    for &count in tally {
        if count > max1 {
            max2 = max1;
            max1 = count;
        } else if count > max2 {
            max2 = count;
        }
    }
    (max1, max2)
}

/// Index of the highest nonzero slot, first encountered winning ties
pub(crate) fn argmax_first(tally: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (mv, &count) in tally.iter().enumerate() {
        if count > 0 && best.map_or(true, |(_, b)| count > b) {
            best = Some((mv, count));
        }
    }
    best.map(|(mv, _)| mv)
}

fn average_decision<P: Position>(
    trees: &mut [SearchTree<P>],
    move_space: usize,
    options: &SearchOptions,
) -> Option<usize> {
    let budget = options.simulations;
    let rounds = (budget / 1000).max(1);
    let increment = budget / rounds;
    let tree_count = trees.len() as u64;

    // initial unsynchronized quarter of the budget, no aggregation;
    // counts as the first `rounds / 4` rounds of the schedule
    run_block(trees, rounds / 4 * increment);

    let mut tally = vec![0u32; move_space];
    for round in rounds / 4 + 1..=rounds {
        run_block(trees, increment);
        tally = visit_tally(trees, move_space);

        let (max1, max2) = top_two(&tally);
        let done = round as u64 * increment as u64 * tree_count;
        let remaining = (budget as u64 * tree_count).saturating_sub(done) as f64;
        if (max2 as f64) + options.early_exit_margin * remaining < max1 as f64 {
            break;
        }
    }

    argmax_first(&tally)
}

fn majority_decision<P: Position>(
    trees: &mut [SearchTree<P>],
    move_space: usize,
    simulations: u32,
) -> Option<usize> {
    let mut votes = vec![0u32; move_space];

    thread::scope(|scope| {
        let handles: Vec<_> = trees
            .iter_mut()
            .map(|tree| {
                scope.spawn(move || {
                    tree.run(simulations);
                    tree.best_move()
                })
            })
            .collect();

        for handle in handles {
            if let Some(mv) = handle.join().expect("search thread panicked") {
                votes[mv] += 1;
            }
        }
    });

    argmax_first(&votes)
}
