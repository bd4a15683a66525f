//! Tengen - engine for the game of NoGo

pub mod agent;
pub mod ai;
pub mod core;
pub mod engine;
pub mod heuristics;
pub mod utils;

// Re-export commonly used items
pub use engine::Engine;
