use crate::ai::heuristic::PatternTally;
use crate::game::{Board, Player};

/// Outcome of a finished game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Classify `board` for `player`. Boards without a winner count as a draw.
    pub fn for_player(board: &Board, player: Player) -> Self {
        match board.winner() {
            Some(winner) if winner == player => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameResult::Win => "WIN",
            GameResult::Loss => "LOSS",
            GameResult::Draw => "DRAW",
        }
    }
}

/// Pattern and positional statistics gathered over the closing positions
/// of a game, all from the learning agent's point of view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStats {
    pub my_threes: usize,
    pub opp_threes: usize,
    pub my_twos: usize,
    pub opp_twos: usize,
    pub my_open_twos: usize,
    pub opp_open_twos: usize,
    /// Boards on which we had two or more threes at once.
    pub my_double_threats: usize,
    pub opp_double_threats: usize,
    /// Own minus opponent pieces in the center column.
    pub center_control: i64,
    /// Own minus opponent pieces in the two columns beside the center.
    pub adjacent_control: i64,
    /// Own pieces on the bottom row.
    pub bottom_control: usize,
    /// Own pieces in the outermost columns.
    pub edge_pieces: usize,
    /// Own pieces in the top two rows.
    pub high_pieces: usize,
    pub avg_mobility: f64,
    pub boards_analyzed: usize,
}

impl GameStats {
    /// Accumulate statistics over `boards` for `player`. Counts are summed
    /// across boards, so a pattern that persists is counted once per board.
    pub fn tabulate(boards: &[Board], player: Player) -> Self {
        let mut stats = GameStats::default();
        let mut mobility_total = 0usize;

        for board in boards {
            let tally = PatternTally::scan(board, player);
            stats.my_threes += tally.own_threes;
            stats.opp_threes += tally.opp_threes;
            stats.my_twos += tally.own_twos;
            stats.opp_twos += tally.opp_twos;
            stats.my_open_twos += tally.own_open_twos;
            stats.opp_open_twos += tally.opp_open_twos;
            if tally.own_threes >= 2 {
                stats.my_double_threats += 1;
            }
            if tally.opp_threes >= 2 {
                stats.opp_double_threats += 1;
            }

            stats.tabulate_positions(board, player);
            mobility_total += board.legal_moves().len();
        }

        stats.boards_analyzed = boards.len();
        if !boards.is_empty() {
            stats.avg_mobility = mobility_total as f64 / boards.len() as f64;
        }
        stats
    }

    fn tabulate_positions(&mut self, board: &Board, player: Player) {
        let (rows, cols) = (board.rows(), board.cols());
        let center = cols / 2;

        for row in 0..rows {
            for col in 0..cols {
                let Some(owner) = board.get(row, col).player() else {
                    continue;
                };
                let adjacent = col + 1 == center || col == center + 1;
                if owner == player {
                    if col == center {
                        self.center_control += 1;
                    } else if adjacent {
                        self.adjacent_control += 1;
                    }
                    if row == rows - 1 {
                        self.bottom_control += 1;
                    }
                    if col == 0 || col == cols - 1 {
                        self.edge_pieces += 1;
                    }
                    if row < 2 {
                        self.high_pieces += 1;
                    }
                } else if col == center {
                    self.center_control -= 1;
                } else if adjacent {
                    self.adjacent_control -= 1;
                }
            }
        }
    }
}
