//! Single-tree Monte Carlo search

use rand::rngs::StdRng;

use super::mcts::{MctsNode, Position};

/// One independent search tree, driven through a fixed number of
/// select/expand/simulate/backpropagate iterations.
///
/// The tree owns its node graph and its random stream exclusively, so a
/// set of trees can run on separate threads with no shared mutable
/// state. The whole graph is dropped with the tree once a decision has
/// been extracted; trees are never reused across decisions.
pub struct SearchTree<P: Position> {
    root: MctsNode<P>,
    rng: StdRng,
    exploration: f64,
}

impl<P: Position> SearchTree<P> {
    pub fn new(state: P, exploration: f64, rng: StdRng) -> Self {
        Self {
            root: MctsNode::new(state),
            rng,
            exploration,
        }
    }

    /// Run a block of simulations; the root's visit count grows by
    /// exactly `iterations`.
    pub fn run(&mut self, iterations: u32) {
        for _ in 0..iterations {
            self.playout();
        }
    }

    fn playout(&mut self) {
        // select: descend along the best selection score until a node
        // that still has an unexpanded legal move, or a childless one
        let mut path = Vec::new();
        {
            let mut node = &self.root;
            while node.fully_expanded() && !node.edges.is_empty() {
                let Some(idx) = node.select_child(self.exploration) else {
                    break;
                };
                path.push(idx);
                node = &node.edges[idx].node;
            }
        }

        // expand one child off the end of the path, if possible
        let leaf = Self::node_at_mut(&mut self.root, &path);
        if let Some(idx) = leaf.expand(&mut self.rng) {
            path.push(idx);
        }

        // simulate from the path's last node
        let winner = Self::node_at(&self.root, &path).simulate(&mut self.rng);

        // backpropagate along the path, root inclusive
        let mut node = &mut self.root;
        node.stats.record(winner, node.state.side_to_move());
        for &idx in &path {
            node = &mut node.edges[idx].node;
            node.stats.record(winner, node.state.side_to_move());
        }
    }

    fn node_at<'a>(mut node: &'a MctsNode<P>, path: &[usize]) -> &'a MctsNode<P> {
        for &idx in path {
            node = &node.edges[idx].node;
        }
        node
    }

    fn node_at_mut<'a>(mut node: &'a mut MctsNode<P>, path: &[usize]) -> &'a mut MctsNode<P> {
        for &idx in path {
            node = &mut node.edges[idx].node;
        }
        node
    }

    /// Best move by this tree's own statistics; `None` when the root has
    /// no children.
    pub fn best_move(&self) -> Option<usize> {
        self.root.best_move()
    }

    pub fn root(&self) -> &MctsNode<P> {
        &self.root
    }

    /// Add this tree's root-child visit counts into a per-move tally
    pub fn add_visits(&self, tally: &mut [u32]) {
        for edge in &self.root.edges {
            tally[edge.mv] += edge.node.stats.visits;
        }
    }
}
