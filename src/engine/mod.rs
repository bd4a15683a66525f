//! Engine session state and options

pub mod engine;
pub mod options;

pub use engine::Engine;
pub use options::EngineOptions;
