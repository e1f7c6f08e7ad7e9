use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Board, Player};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        RandomAgent {
            player,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn with_seed(player: Player, seed: u64) -> Self {
        RandomAgent {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        if board.is_terminal() {
            return None;
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.random_range(0..moves.len())])
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }
}
