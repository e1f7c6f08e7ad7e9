use crate::error::WeightsError;
use crate::game::{Board, Player};

use super::adaptive::{AdaptiveAgent, AdaptiveConfig};
use super::minimax::MinimaxAgent;
use super::random::RandomAgent;
use super::search::Difficulty;

/// Universal interface for all move-choosing players.
pub trait Agent: Send {
    /// Choose a column for the side to move. Returns `None` only when the
    /// board has no legal move.
    fn select_move(&mut self, board: &Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// The side this agent is currently playing.
    fn player(&self) -> Player;

    /// Switch sides between games.
    fn set_player(&mut self, player: Player);

    /// Called with the board after every move of the game, by either side.
    fn observe_move(&mut self, _board: &Board) {}

    /// Called once with the final board when a game ends.
    fn finalize_game(&mut self, _final_board: &Board) -> Result<(), WeightsError> {
        Ok(())
    }

    /// Called when a game is dropped before it ends. Nothing is learned.
    fn abandon_game(&mut self) {}
}

/// How to build an agent.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentMode {
    /// Alpha-beta with the fixed classic evaluator.
    Fixed(Difficulty),
    /// Alpha-beta with learned weights.
    Adaptive(AdaptiveConfig),
    /// Uniformly random legal moves.
    Random,
}

/// Build a boxed agent for `player`.
pub fn create_agent(player: Player, mode: AgentMode) -> Box<dyn Agent> {
    match mode {
        AgentMode::Fixed(difficulty) => Box::new(MinimaxAgent::new(player, difficulty)),
        AgentMode::Adaptive(config) => Box::new(AdaptiveAgent::from_config(player, config)),
        AgentMode::Random => Box::new(RandomAgent::new(player)),
    }
}
