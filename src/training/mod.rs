//! Training infrastructure: staged self-play against fixed opponents and
//! rolling outcome metrics.

pub mod episode;
pub mod metrics;
pub mod trainer;

pub use episode::{play_game, play_training_game, GameRecord};
pub use trainer::{Opponent, StageConfig, StageReport, Trainer, TrainerConfig, TrainingReport};
