use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("game is already over")]
    GameOver,
}

/// Result of [`Board::apply_move`](super::Board::apply_move).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Piece placed, game continues, turn passed to the other player.
    Accepted,
    /// Nothing changed.
    Rejected(MoveError),
    /// Piece placed and completed at least one line. `cells` holds every
    /// connected cell of the winning line(s), for highlighting.
    Win {
        player: Player,
        cells: Vec<(usize, usize)>,
    },
    /// Piece placed and filled the board without a winner.
    Draw,
}

impl MoveOutcome {
    /// Whether the piece was placed on the board.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// Whether this move ended the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::Win { .. } | MoveOutcome::Draw)
    }
}
