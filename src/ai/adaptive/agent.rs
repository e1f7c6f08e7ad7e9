use std::path::PathBuf;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::ai::agent::Agent;
use crate::ai::heuristic::AdaptiveHeuristic;
use crate::ai::search::alpha_beta;
use crate::checkpoint::{FileWeightStore, NullWeightStore, WeightStore};
use crate::error::WeightsError;
use crate::game::{Board, Player};

use super::stats::{GameResult, GameStats};
use super::update::adjust_weights;
use super::weights::{Feature, Weights};

/// Settings for an [`AdaptiveAgent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Search depth in plies.
    pub depth: usize,
    pub learning_rate: f64,
    /// Fraction each weight is pulled back toward its default per game.
    pub decay: f64,
    /// Number of closing positions analyzed after a game.
    pub critical_window: usize,
    /// Weight file. `None` disables persistence.
    pub weights_path: Option<PathBuf>,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        AdaptiveConfig {
            depth: 6,
            learning_rate: 0.03,
            decay: 0.02,
            critical_window: 10,
            weights_path: Some(PathBuf::from("agent_weights.json")),
        }
    }
}

/// What happened when a finished game was learned from.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningReport {
    pub result: GameResult,
    /// `None` when the trace was too short to learn from.
    pub stats: Option<GameStats>,
}

impl LearningReport {
    pub fn updated(&self) -> bool {
        self.stats.is_some()
    }
}

/// Alpha-beta player whose evaluator weights drift with experience.
///
/// The agent records every position of the current game, and when the game
/// ends it nudges its weights based on patterns in the closing positions.
/// An agent owns its trace and weights without any locking: driving one
/// agent from two games at once interleaves both traces and corrupts the
/// update, so callers must give each concurrent game its own agent.
pub struct AdaptiveAgent {
    player: Player,
    config: AdaptiveConfig,
    weights: Weights,
    trace: Vec<Board>,
    store: Box<dyn WeightStore>,
}

impl AdaptiveAgent {
    /// Build an agent and load any weights `store` holds. Unreadable
    /// weights are logged and replaced by the defaults.
    pub fn new(player: Player, config: AdaptiveConfig, store: Box<dyn WeightStore>) -> Self {
        let weights = match store.load() {
            Ok(Some(map)) => {
                info!("Loaded adaptive weights from {}", store.describe());
                Weights::from_map(&map)
            }
            Ok(None) => {
                info!("No saved weights at {}, starting from defaults", store.describe());
                Weights::defaults()
            }
            Err(e) => {
                warn!("Could not load weights ({e}), starting from defaults");
                Weights::defaults()
            }
        };

        AdaptiveAgent {
            player,
            config,
            weights,
            trace: Vec::new(),
            store,
        }
    }

    /// Build an agent backed by the file named in `config`, or by no store
    /// at all when the path is unset.
    pub fn from_config(player: Player, config: AdaptiveConfig) -> Self {
        let store: Box<dyn WeightStore> = match &config.weights_path {
            Some(path) => Box::new(FileWeightStore::new(path.clone())),
            None => Box::new(NullWeightStore),
        };
        Self::new(player, config, store)
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.config.depth = depth.max(1);
    }

    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }

    /// Append a snapshot of `board` to the current game's trace.
    pub fn record_game_state(&mut self, board: &Board) {
        self.trace.push(board.copy());
    }

    pub fn save_weights(&mut self) -> Result<(), WeightsError> {
        self.store.save(&self.weights.to_map())
    }

    /// Classify the finished game, update and decay the weights, clear the
    /// trace and persist. A failed save is returned after the in-memory
    /// update has been kept.
    pub fn learn_from_game(&mut self, final_board: &Board) -> Result<LearningReport, WeightsError> {
        let result = GameResult::for_player(final_board, self.player);

        let report = if self.trace.len() < 2 {
            debug!(
                "Skipping weight update: only {} recorded position(s)",
                self.trace.len()
            );
            LearningReport {
                result,
                stats: None,
            }
        } else {
            let window = self.config.critical_window.min(self.trace.len());
            let recent = &self.trace[self.trace.len() - window..];
            let stats = GameStats::tabulate(recent, self.player);

            adjust_weights(&mut self.weights, result, &stats, self.config.learning_rate);
            self.weights.decay_toward_defaults(self.config.decay);

            info!(
                "{} | my_3s={} opp_3s={} dbl={} ctr={} | three={:.1} opp_three={:.1} center={:.2}",
                result.label(),
                stats.my_threes,
                stats.opp_threes,
                stats.my_double_threats,
                stats.center_control,
                self.weights[Feature::Three],
                self.weights[Feature::OppThree],
                self.weights[Feature::Center],
            );
            LearningReport {
                result,
                stats: Some(stats),
            }
        };

        self.trace.clear();
        if let Err(e) = self.save_weights() {
            warn!("Failed to save weights to {}: {e}", self.store.describe());
            return Err(e);
        }
        Ok(report)
    }
}

impl Agent for AdaptiveAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        let heuristic = AdaptiveHeuristic::new(&self.weights);
        let result = alpha_beta(board, self.player, self.config.depth, &heuristic);
        debug!(
            "Adaptive search: move {:?} value {:.1} ({} nodes)",
            result.best_move, result.value, result.nodes
        );
        result.best_move
    }

    fn name(&self) -> &str {
        "Adaptive"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    fn observe_move(&mut self, board: &Board) {
        self.record_game_state(board);
    }

    fn finalize_game(&mut self, final_board: &Board) -> Result<(), WeightsError> {
        self.learn_from_game(final_board).map(|_| ())
    }

    fn abandon_game(&mut self) {
        self.trace.clear();
    }
}
