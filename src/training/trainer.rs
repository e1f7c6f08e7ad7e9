use std::fmt;
use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};

use crate::ai::{AdaptiveAgent, Agent, Difficulty, MinimaxAgent, RandomAgent};
use crate::error::TrainingError;
use crate::game::Player;
use crate::training::episode::{episode_seed, play_training_game};
use crate::training::metrics::{EpisodeResult, TimingMetrics, TrainingMetrics};

/// Opponent faced during a training stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Easy,
    Medium,
    Hard,
    Random,
}

impl Opponent {
    /// Search preset, or `None` for the random mover.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Opponent::Easy => Some(Difficulty::Easy),
            Opponent::Medium => Some(Difficulty::Medium),
            Opponent::Hard => Some(Difficulty::Hard),
            Opponent::Random => None,
        }
    }

    fn build(self, seed: u64) -> Box<dyn Agent> {
        match self.difficulty() {
            Some(difficulty) => Box::new(MinimaxAgent::new(Player::Two, difficulty)),
            None => Box::new(RandomAgent::with_seed(Player::Two, seed)),
        }
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.difficulty() {
            Some(d) => write!(f, "{d}"),
            None => f.write_str("random"),
        }
    }
}

/// A block of consecutive games against one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub games: usize,
    pub opponent: Opponent,
}

/// Trainer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Search depth the learning agent uses while training.
    pub training_depth: usize,
    /// Games between progress lines.
    pub log_interval: usize,
    /// Base seed for random opponents.
    pub seed: u64,
    pub stages: Vec<StageConfig>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            training_depth: 4,
            log_interval: 25,
            seed: 42,
            stages: vec![
                StageConfig {
                    games: 100,
                    opponent: Opponent::Easy,
                },
                StageConfig {
                    games: 200,
                    opponent: Opponent::Medium,
                },
                StageConfig {
                    games: 100,
                    opponent: Opponent::Hard,
                },
            ],
        }
    }
}

impl TrainerConfig {
    pub fn total_games(&self) -> usize {
        self.stages.iter().map(|s| s.games).sum()
    }
}

/// Outcome counts for one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub opponent: Opponent,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    /// Games in which the learning agent moved first.
    pub games_first: usize,
    pub average_game_length: f32,
}

impl StageReport {
    fn new(opponent: Opponent) -> Self {
        StageReport {
            opponent,
            games: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            games_first: 0,
            average_game_length: 0.0,
        }
    }

    fn record(&mut self, episode: &EpisodeResult) {
        use crate::ai::adaptive::GameResult;

        let total_len = self.average_game_length * self.games as f32 + episode.game_length as f32;
        self.games += 1;
        self.average_game_length = total_len / self.games as f32;
        if episode.adaptive_first {
            self.games_first += 1;
        }
        match episode.result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn win_rate(&self) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f32 / self.games as f32
        }
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vs {:<6} | {:>4} games | W {:>4} L {:>4} D {:>4} | win rate {:>5.1}% | avg len {:.1}",
            self.opponent.to_string(),
            self.games,
            self.wins,
            self.losses,
            self.draws,
            self.win_rate() * 100.0,
            self.average_game_length,
        )
    }
}

/// Summary of a full training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub stages: Vec<StageReport>,
}

impl TrainingReport {
    pub fn total_games(&self) -> usize {
        self.stages.iter().map(|s| s.games).sum()
    }
}

/// Staged self-play trainer for an [`AdaptiveAgent`].
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run every stage in order. Within each stage the first player
    /// alternates, starting with the learning agent. Its search depth is set
    /// to `training_depth` for the run and restored afterwards.
    pub fn train(&self, agent: &mut AdaptiveAgent) -> Result<TrainingReport, TrainingError> {
        let total = self.config.total_games();
        let log_interval = self.config.log_interval.max(1);
        let play_depth = agent.config().depth;
        agent.set_depth(self.config.training_depth);

        info!(
            "Starting adaptive training: {} games over {} stage(s), depth {}",
            total,
            self.config.stages.len(),
            self.config.training_depth
        );

        let result = self.run_stages(agent, total, log_interval);
        agent.set_depth(play_depth);
        let report = result?;

        agent.save_weights()?;
        info!("Training complete. Total games: {}", report.total_games());
        Ok(report)
    }

    fn run_stages(
        &self,
        agent: &mut AdaptiveAgent,
        total: usize,
        log_interval: usize,
    ) -> Result<TrainingReport, TrainingError> {
        let mut metrics = TrainingMetrics::with_capacity(log_interval);
        let mut timing = TimingMetrics::with_capacity(log_interval);
        let mut stages = Vec::with_capacity(self.config.stages.len());
        let mut game_index = 0;

        for stage in &self.config.stages {
            info!("Stage: {} games vs {}", stage.games, stage.opponent);
            let mut opponent = stage.opponent.build(episode_seed(self.config.seed, game_index));
            let mut report = StageReport::new(stage.opponent);

            for game in 0..stage.games {
                let adaptive_first = game % 2 == 0;
                let started = Instant::now();
                let episode = play_training_game(agent, opponent.as_mut(), adaptive_first)?;
                timing.record_game_time(started.elapsed());

                report.record(&episode);
                metrics.record_episode(episode);
                game_index += 1;

                if game_index % log_interval == 0 {
                    info!(
                        "Game {}/{} | vs {} | win {:.1}% | loss {:.1}% | draw {:.1}% | avg_len {:.1} | {:.1} ms/game | {:.2} games/s",
                        game_index,
                        total,
                        stage.opponent,
                        metrics.win_rate(log_interval) * 100.0,
                        metrics.loss_rate(log_interval) * 100.0,
                        metrics.draw_rate(log_interval) * 100.0,
                        metrics.average_game_length(log_interval),
                        timing.avg_game_ms(log_interval),
                        timing.games_per_sec(),
                    );
                    timing.reset_window();
                }
            }

            info!("Finished {report}");
            stages.push(report);
        }

        Ok(TrainingReport { stages })
    }
}
