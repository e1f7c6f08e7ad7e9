//! Host-facing game driver for mixing human and agent players.

use log::debug;

use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::{Board, GameOutcome, MoveOutcome, Player};

/// Occupant of one seat.
pub enum Participant {
    Human,
    Agent(Box<dyn Agent>),
}

impl Participant {
    pub fn is_human(&self) -> bool {
        matches!(self, Participant::Human)
    }

    pub fn name(&self) -> &str {
        match self {
            Participant::Human => "Human",
            Participant::Agent(agent) => agent.name(),
        }
    }
}

/// One game between two seats. Agents are told about every move and are
/// finalized once when the game ends, so an adaptive agent learns from
/// games played through a session just as it does in training.
pub struct Session {
    board: Board,
    seats: [Participant; 2],
}

impl Session {
    /// `first` plays as Player One.
    pub fn new(first: Participant, second: Participant) -> Self {
        let mut seats = [first, second];
        for (seat, player) in seats.iter_mut().zip([Player::One, Player::Two]) {
            if let Participant::Agent(agent) = seat {
                agent.set_player(player);
            }
        }
        Session {
            board: Board::new(),
            seats,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.board.outcome()
    }

    pub fn participant(&self, player: Player) -> &Participant {
        &self.seats[seat_index(player)]
    }

    /// True when the game is live and a human is to move.
    pub fn awaiting_human(&self) -> bool {
        !self.board.is_terminal() && self.participant(self.board.turn()).is_human()
    }

    /// Play a human move. Illegal columns come back as
    /// `MoveOutcome::Rejected` and leave the board unchanged.
    pub fn submit_human_move(&mut self, column: usize) -> Result<MoveOutcome, SessionError> {
        if self.board.is_terminal() {
            return Err(SessionError::GameOver);
        }
        if !self.awaiting_human() {
            return Err(SessionError::NotHumanTurn);
        }

        let outcome = self.board.apply_move(column);
        if outcome.is_accepted() {
            self.notify_agents(&outcome)?;
        }
        Ok(outcome)
    }

    /// Ask the agent to move to choose and play its column.
    pub fn play_agent_move(&mut self) -> Result<MoveOutcome, SessionError> {
        if self.board.is_terminal() {
            return Err(SessionError::GameOver);
        }
        let player = self.board.turn();
        let Participant::Agent(agent) = &mut self.seats[seat_index(player)] else {
            return Err(SessionError::NotAgentTurn);
        };

        let column = agent
            .select_move(&self.board)
            .ok_or(SessionError::NoMove { player })?;
        debug!("{} plays column {column}", agent.name());

        let outcome = self.board.apply_move(column);
        if let MoveOutcome::Rejected(reason) = outcome {
            return Err(SessionError::IllegalAgentMove {
                player,
                column,
                reason,
            });
        }
        self.notify_agents(&outcome)?;
        Ok(outcome)
    }

    /// Let agents move until a human is to move or the game ends.
    pub fn play_until_human(&mut self) -> Result<Vec<MoveOutcome>, SessionError> {
        let mut outcomes = Vec::new();
        while !self.board.is_terminal() && !self.awaiting_human() {
            outcomes.push(self.play_agent_move()?);
        }
        Ok(outcomes)
    }

    /// Start a fresh game with the same seats. Agents in the middle of a
    /// game drop it without learning.
    pub fn reset(&mut self) {
        if !self.board.is_terminal() {
            for seat in &mut self.seats {
                if let Participant::Agent(agent) = seat {
                    agent.abandon_game();
                }
            }
        }
        self.board = Board::new();
    }

    /// Give the seats back, Player One first.
    pub fn into_participants(self) -> [Participant; 2] {
        self.seats
    }

    /// Show the new position to every agent, and finalize them all if the
    /// game just ended. The move stands even if finalizing fails, and the
    /// error carries its outcome.
    fn notify_agents(&mut self, outcome: &MoveOutcome) -> Result<(), SessionError> {
        for seat in &mut self.seats {
            if let Participant::Agent(agent) = seat {
                agent.observe_move(&self.board);
            }
        }
        if !self.board.is_terminal() {
            return Ok(());
        }

        let mut first_err = None;
        for seat in &mut self.seats {
            if let Participant::Agent(agent) = seat {
                if let Err(e) = agent.finalize_game(&self.board) {
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(source) => Err(SessionError::Finalize {
                outcome: outcome.clone(),
                source,
            }),
            None => Ok(()),
        }
    }
}

fn seat_index(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AdaptiveAgent, AdaptiveConfig, Difficulty, MinimaxAgent};
    use crate::checkpoint::{FailingWeightStore, MemoryWeightStore};
    use crate::game::MoveError;

    fn minimax(difficulty: Difficulty) -> Participant {
        Participant::Agent(Box::new(MinimaxAgent::new(Player::One, difficulty)))
    }

    #[test]
    fn test_agent_seats_get_their_side() {
        let session = Session::new(minimax(Difficulty::Easy), minimax(Difficulty::Easy));
        for player in [Player::One, Player::Two] {
            let Participant::Agent(agent) = session.participant(player) else {
                panic!("expected agent seat");
            };
            assert_eq!(agent.player(), player);
        }
    }

    #[test]
    fn test_human_turn_enforced() {
        let mut session = Session::new(minimax(Difficulty::Easy), Participant::Human);
        assert!(!session.awaiting_human());
        assert!(matches!(
            session.submit_human_move(3),
            Err(SessionError::NotHumanTurn)
        ));

        let outcomes = session.play_until_human().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(session.awaiting_human());
        assert!(matches!(
            session.play_agent_move(),
            Err(SessionError::NotAgentTurn)
        ));
    }

    #[test]
    fn test_rejected_human_move_leaves_board() {
        let mut session = Session::new(Participant::Human, Participant::Human);
        let outcome = session.submit_human_move(9).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(MoveError::InvalidColumn));
        assert_eq!(session.board().move_count(), 0);
        assert_eq!(session.board().turn(), Player::One);
    }

    #[test]
    fn test_human_game_to_win() {
        let mut session = Session::new(Participant::Human, Participant::Human);
        for column in [0, 1, 0, 1, 0, 1] {
            assert_eq!(session.submit_human_move(column).unwrap(), MoveOutcome::Accepted);
        }
        let outcome = session.submit_human_move(0).unwrap();
        assert!(matches!(outcome, MoveOutcome::Win { player: Player::One, .. }));
        assert_eq!(session.outcome(), Some(GameOutcome::Winner(Player::One)));
        assert!(matches!(
            session.submit_human_move(2),
            Err(SessionError::GameOver)
        ));
    }

    #[test]
    fn test_agent_vs_agent_runs_to_completion() {
        let mut session = Session::new(minimax(Difficulty::Easy), minimax(Difficulty::Medium));
        let outcomes = session.play_until_human().unwrap();
        assert!(session.board().is_terminal());
        assert!(outcomes.last().unwrap().is_terminal());
        assert_eq!(outcomes.len(), session.board().move_count());
    }

    #[test]
    fn test_adaptive_agent_learns_from_session() {
        let store = MemoryWeightStore::new();
        let config = AdaptiveConfig {
            depth: 2,
            weights_path: None,
            ..AdaptiveConfig::default()
        };
        let adaptive = AdaptiveAgent::new(Player::Two, config, Box::new(store.clone()));
        let mut session = Session::new(minimax(Difficulty::Medium), Participant::Agent(Box::new(adaptive)));

        session.play_until_human().unwrap();
        assert!(session.board().is_terminal());
        assert!(store.saved().is_some());
    }

    fn failing_adaptive(player: Player) -> Participant {
        let config = AdaptiveConfig {
            depth: 2,
            weights_path: None,
            ..AdaptiveConfig::default()
        };
        Participant::Agent(Box::new(AdaptiveAgent::new(
            player,
            config,
            Box::new(FailingWeightStore),
        )))
    }

    #[test]
    fn test_finalize_error_keeps_final_outcome() {
        let mut session = Session::new(Participant::Human, failing_adaptive(Player::Two));
        // The human always takes the leftmost open column.
        let mut last = None;
        while !session.board().is_terminal() {
            let column = session.board().legal_moves()[0];
            match session.submit_human_move(column) {
                Ok(_) => {}
                Err(SessionError::Finalize { outcome, .. }) => {
                    last = Some(outcome);
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
            match session.play_until_human() {
                Ok(_) => {}
                Err(SessionError::Finalize { outcome, .. }) => {
                    last = Some(outcome);
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        let outcome = last.expect("game should end with a finalize error");
        assert!(outcome.is_terminal());
        assert!(session.board().is_terminal());
        if let MoveOutcome::Win { cells, .. } = outcome {
            assert_eq!(cells.len(), 4);
        }
    }

    #[test]
    fn test_finalize_error_on_human_win_reports_cells() {
        let mut session = Session::new(Participant::Human, failing_adaptive(Player::Two));
        // Set up the position directly; the agent seat never gets to move.
        for column in [0, 1, 0, 1, 0, 1] {
            session.board.apply_move(column);
        }
        let err = session.submit_human_move(0).unwrap_err();
        let SessionError::Finalize { outcome, source } = err else {
            panic!("expected finalize error");
        };
        let MoveOutcome::Win { player, mut cells } = outcome else {
            panic!("expected a win");
        };
        cells.sort();
        assert_eq!(player, Player::One);
        assert_eq!(cells, vec![(2, 0), (3, 0), (4, 0), (5, 0)]);
        assert!(matches!(source, crate::error::WeightsError::Write { .. }));
        assert_eq!(session.outcome(), Some(GameOutcome::Winner(Player::One)));
    }

    #[test]
    fn test_reset_and_reuse_adaptive_agent() {
        let store = MemoryWeightStore::new();
        let config = AdaptiveConfig {
            depth: 2,
            weights_path: None,
            ..AdaptiveConfig::default()
        };
        let adaptive = AdaptiveAgent::new(Player::Two, config, Box::new(store.clone()));
        let mut session = Session::new(minimax(Difficulty::Easy), Participant::Agent(Box::new(adaptive)));

        session.play_until_human().unwrap();
        let first_save = store.saved();
        assert!(first_save.is_some());

        session.reset();
        assert_eq!(session.board().move_count(), 0);
        session.play_until_human().unwrap();
        assert!(session.board().is_terminal());

        let [_, second] = session.into_participants();
        assert_eq!(second.name(), "Adaptive");
    }

    #[test]
    fn test_reset_mid_game_starts_fresh() {
        let mut session = Session::new(Participant::Human, failing_adaptive(Player::Two));
        session.submit_human_move(3).unwrap();
        session.play_until_human().unwrap();
        session.reset();
        assert_eq!(session.board().move_count(), 0);
        assert!(session.awaiting_human());
    }
}
