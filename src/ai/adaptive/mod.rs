//! Self-tuning evaluator weights.
//!
//! [`AdaptiveAgent`] plays with [`AdaptiveHeuristic`](crate::ai::AdaptiveHeuristic)
//! over its own [`Weights`] and adjusts them after every finished game.

mod agent;
mod stats;
mod update;
mod weights;

pub use agent::{AdaptiveAgent, AdaptiveConfig, LearningReport};
pub use stats::{GameResult, GameStats};
pub use update::adjust_weights;
pub use weights::{Feature, Weights};
