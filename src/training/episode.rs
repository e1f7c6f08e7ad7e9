use crate::ai::adaptive::GameResult;
use crate::ai::{AdaptiveAgent, Agent};
use crate::error::TrainingError;
use crate::game::{Board, MoveOutcome, Player};
use crate::training::metrics::EpisodeResult;

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub final_board: Board,
    pub moves: Vec<usize>,
}

/// Play one game on a fresh board. `first` is seated as Player One.
///
/// Both agents observe every position and are finalized with the last one.
/// Every agent is finalized before the first finalize error is returned.
/// An agent that returns no move or an illegal column aborts the game.
pub fn play_game(first: &mut dyn Agent, second: &mut dyn Agent) -> Result<GameRecord, TrainingError> {
    first.set_player(Player::One);
    second.set_player(Player::Two);

    let mut board = Board::new();
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let player = board.turn();
        let mover: &mut dyn Agent = if player == Player::One {
            &mut *first
        } else {
            &mut *second
        };

        let column = mover
            .select_move(&board)
            .ok_or(TrainingError::NoMove { player })?;
        if let MoveOutcome::Rejected(reason) = board.apply_move(column) {
            return Err(TrainingError::IllegalMove {
                player,
                column,
                reason,
            });
        }
        moves.push(column);

        first.observe_move(&board);
        second.observe_move(&board);
    }

    // Both agents are finalized even if the first one fails to persist.
    let first_result = first.finalize_game(&board);
    let second_result = second.finalize_game(&board);
    first_result?;
    second_result?;

    Ok(GameRecord {
        final_board: board,
        moves,
    })
}

/// Play the learning agent against `opponent`, seating it first or second.
pub fn play_training_game(
    adaptive: &mut AdaptiveAgent,
    opponent: &mut dyn Agent,
    adaptive_first: bool,
) -> Result<EpisodeResult, TrainingError> {
    let record = if adaptive_first {
        play_game(adaptive, opponent)?
    } else {
        play_game(opponent, adaptive)?
    };

    Ok(EpisodeResult {
        result: GameResult::for_player(&record.final_board, adaptive.player()),
        game_length: record.moves.len(),
        adaptive_first,
    })
}

/// Derive a deterministic seed for a given game index.
pub fn episode_seed(base_seed: u64, episode_index: usize) -> u64 {
    // FNV-1a-inspired mixing for deterministic, well-distributed seeds
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = episode_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AdaptiveConfig, Difficulty, MinimaxAgent, RandomAgent};
    use crate::ai::Weights;
    use crate::checkpoint::{FailingWeightStore, MemoryWeightStore};
    use crate::error::WeightsError;

    fn adaptive(store: MemoryWeightStore) -> AdaptiveAgent {
        let config = AdaptiveConfig {
            depth: 2,
            weights_path: None,
            ..AdaptiveConfig::default()
        };
        AdaptiveAgent::new(Player::One, config, Box::new(store))
    }

    /// Always plays the given column, legal or not.
    struct Stubborn(usize, Player);

    impl Agent for Stubborn {
        fn select_move(&mut self, _board: &Board) -> Option<usize> {
            Some(self.0)
        }
        fn name(&self) -> &str {
            "Stubborn"
        }
        fn player(&self) -> Player {
            self.1
        }
        fn set_player(&mut self, player: Player) {
            self.1 = player;
        }
    }

    /// Counts observed positions and finalizations.
    #[derive(Default)]
    struct Observer {
        seen: usize,
        finalized: usize,
        player: Option<Player>,
    }

    impl Agent for Observer {
        fn select_move(&mut self, board: &Board) -> Option<usize> {
            board.legal_moves().first().copied()
        }
        fn name(&self) -> &str {
            "Observer"
        }
        fn player(&self) -> Player {
            self.player.unwrap_or(Player::One)
        }
        fn set_player(&mut self, player: Player) {
            self.player = Some(player);
        }
        fn observe_move(&mut self, _board: &Board) {
            self.seen += 1;
        }
        fn finalize_game(&mut self, _final_board: &Board) -> Result<(), WeightsError> {
            self.finalized += 1;
            Ok(())
        }
    }

    #[test]
    fn test_play_game_terminates_and_notifies() {
        let mut a = Observer::default();
        let mut b = RandomAgent::with_seed(Player::One, 9);
        let record = play_game(&mut a, &mut b).unwrap();

        assert!(record.final_board.is_terminal());
        assert_eq!(a.seen, record.moves.len());
        assert_eq!(a.finalized, 1);
        assert_eq!(a.player, Some(Player::One));
        assert_eq!(b.player(), Player::Two);
        assert_eq!(record.final_board.move_count(), record.moves.len());
    }

    #[test]
    fn test_illegal_move_aborts() {
        let mut a = Stubborn(0, Player::One);
        let mut b = Stubborn(0, Player::Two);
        // Column 0 fills after six plies with no winner, then X repeats it.
        let err = play_game(&mut a, &mut b).unwrap_err();
        match err {
            TrainingError::IllegalMove { player, column, .. } => {
                assert_eq!(player, Player::One);
                assert_eq!(column, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_training_game_seats_adaptive_agent() {
        let store = MemoryWeightStore::new();
        let mut agent = adaptive(store.clone());
        let mut opponent = MinimaxAgent::new(Player::One, Difficulty::Easy);

        let first = play_training_game(&mut agent, &mut opponent, true).unwrap();
        assert!(first.adaptive_first);
        assert_eq!(agent.player(), Player::One);

        let second = play_training_game(&mut agent, &mut opponent, false).unwrap();
        assert!(!second.adaptive_first);
        assert_eq!(agent.player(), Player::Two);
        assert_eq!(opponent.player(), Player::One);

        // Trace is cleared and weights are saved after every game.
        assert_eq!(agent.trace_len(), 0);
        assert!(store.saved().is_some());
    }

    #[test]
    fn test_failed_save_still_finalizes_second_agent() {
        let config = AdaptiveConfig {
            depth: 2,
            weights_path: None,
            ..AdaptiveConfig::default()
        };
        let mut failing = AdaptiveAgent::new(Player::One, config, Box::new(FailingWeightStore));
        let store = MemoryWeightStore::new();
        let mut healthy = adaptive(store.clone());

        let err = play_game(&mut failing, &mut healthy).unwrap_err();
        assert!(matches!(err, TrainingError::Weights(_)), "{err}");

        assert_eq!(failing.trace_len(), 0);
        assert_eq!(healthy.trace_len(), 0);
        assert!(store.saved().is_some());
        assert_ne!(*healthy.weights(), Weights::defaults());
    }

    #[test]
    fn test_episode_seed_deterministic() {
        assert_eq!(episode_seed(42, 100), episode_seed(42, 100));
    }

    #[test]
    fn test_episode_seed_varies() {
        let s1 = episode_seed(42, 0);
        let s2 = episode_seed(42, 1);
        let s3 = episode_seed(42, 2);
        assert_ne!(s1, s2);
        assert_ne!(s2, s3);
        assert_ne!(s1, s3);
        assert_ne!(episode_seed(1, 0), episode_seed(2, 0));
    }
}
