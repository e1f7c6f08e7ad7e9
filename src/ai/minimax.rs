use crate::game::{Board, Player};

use super::agent::Agent;
use super::heuristic::ClassicHeuristic;
use super::search::{alpha_beta, Difficulty};

/// Fixed-strength opponent: alpha-beta over the classic evaluator at the
/// depth of its difficulty preset.
pub struct MinimaxAgent {
    player: Player,
    difficulty: Difficulty,
    heuristic: ClassicHeuristic,
    name: String,
}

impl MinimaxAgent {
    pub fn new(player: Player, difficulty: Difficulty) -> Self {
        Self::with_heuristic(player, difficulty, ClassicHeuristic::default())
    }

    pub fn with_heuristic(player: Player, difficulty: Difficulty, heuristic: ClassicHeuristic) -> Self {
        MinimaxAgent {
            player,
            difficulty,
            heuristic,
            name: format!("Minimax ({difficulty})"),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        alpha_beta(board, self.player, self.difficulty.depth(), &self.heuristic).best_move
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }
}
