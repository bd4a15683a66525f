//! Configuration options for the engine

use anyhow::{bail, Result};

use crate::agent::AgentKind;
use crate::ai::SearchOptions;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Search configuration for the MCTS player
    pub search: SearchOptions,
    /// Agent playing black
    pub black: AgentKind,
    /// Agent playing white
    pub white: AgentKind,
    /// Number of games the match runner plays
    pub games: u32,
}

impl EngineOptions {
    /// Apply one `name=value` style option from the CLI edge; a value
    /// that fails validation leaves the options unchanged.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match name {
            "sims" => updated.search.simulations = value.parse()?,
            "c" => updated.search.exploration = value.parse()?,
            "threads" => updated.search.threads = value.parse()?,
            "mode" => updated.search.mode = value.parse()?,
            "margin" => updated.search.early_exit_margin = value.parse()?,
            "seed" => updated.search.seed = Some(value.parse()?),
            "black" => updated.black = value.parse()?,
            "white" => updated.white = value.parse()?,
            "games" => updated.games = value.parse()?,
            _ => bail!("Unknown option: {}", name),
        }
        updated.search.validate()?;
        *self = updated;
        Ok(())
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            black: AgentKind::Mcts,
            white: AgentKind::Heuristic,
            games: 1,
        }
    }
}
