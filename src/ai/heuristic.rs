//! Static position evaluation.
//!
//! Both evaluators slide a four-cell window over every row, column and
//! diagonal and score each window by how many pieces each side holds in it.
//! The adaptive evaluator adds positional terms computed once per call and
//! reads every coefficient from a [`Weights`] vector.

use crate::game::{Board, Direction, Player, Window, WindowCounts};

use super::adaptive::{Feature, Weights};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

/// Fixed-weight evaluator used by the difficulty-preset agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicHeuristic {
    pub four: f64,
    pub three: f64,
    pub two: f64,
    pub opp_three: f64,
    pub opp_two: f64,
    /// Bonus per own piece in the center column.
    pub center: f64,
}

impl Default for ClassicHeuristic {
    fn default() -> Self {
        ClassicHeuristic {
            four: 1000.0,
            three: 100.0,
            two: 10.0,
            opp_three: -120.0,
            opp_two: -15.0,
            center: 3.0,
        }
    }
}

impl ClassicHeuristic {
    fn score_window(&self, counts: WindowCounts) -> f64 {
        let mut score = 0.0;
        if counts.own == 4 {
            score += self.four;
        } else if counts.own_line(3) {
            score += self.three;
        } else if counts.own_line(2) {
            score += self.two;
        }

        if counts.opp_line(3) {
            score += self.opp_three;
        } else if counts.opp_line(2) {
            score += self.opp_two;
        }
        score
    }
}

impl Heuristic for ClassicHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let own_cell = player.to_cell();
        let center_col = board.cols() / 2;
        let center_pieces = (0..board.rows())
            .filter(|&row| board.get(row, center_col) == own_cell)
            .count();

        let mut score = center_pieces as f64 * self.center;
        for window in board.windows() {
            score += self.score_window(board.count_window(&window, player));
        }
        score
    }
}

/// Score for a window the evaluated player has completed. Search normally
/// catches finished games before evaluating, so this rarely fires.
pub const ADAPTIVE_FOUR_SCORE: f64 = 10_000.0;

/// Extra weight on the opponent's double threats relative to our own.
pub const OPP_DOUBLE_THREAT_FACTOR: f64 = 1.2;

/// Evaluator driven by a learned [`Weights`] vector.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveHeuristic<'a> {
    weights: &'a Weights,
}

impl<'a> AdaptiveHeuristic<'a> {
    pub fn new(weights: &'a Weights) -> Self {
        AdaptiveHeuristic { weights }
    }

    fn score_window(&self, counts: WindowCounts) -> f64 {
        if counts.is_dead() {
            return 0.0;
        }
        let w = self.weights;
        let mut score = 0.0;

        if counts.own == 4 {
            score += ADAPTIVE_FOUR_SCORE;
        } else if counts.own_line(3) {
            score += w[Feature::Three];
        } else if counts.own_line(2) {
            score += w[Feature::Two];
        } else if counts.own_line(1) {
            score += w[Feature::OnePotential];
        }

        if counts.opp == 4 {
            score -= ADAPTIVE_FOUR_SCORE;
        } else if counts.opp_line(3) {
            score += w[Feature::OppThree];
        } else if counts.opp_line(2) {
            score += w[Feature::OppTwo];
        }
        score
    }

    /// Terms that look at individual pieces rather than windows.
    fn positional(&self, board: &Board, player: Player) -> f64 {
        let w = self.weights;
        let (rows, cols) = (board.rows(), board.cols());
        let center_col = cols / 2;
        let mut score = 0.0;

        for row in 0..rows {
            let height_factor = (rows - 1 - row) as f64 / rows as f64;
            for col in 0..cols {
                let sign = match board.get(row, col).player() {
                    Some(p) if p == player => 1.0,
                    Some(_) => -1.0,
                    None => continue,
                };
                if col == center_col {
                    score += sign * w[Feature::Center];
                } else if col + 1 == center_col || col == center_col + 1 {
                    score += sign * w[Feature::CenterAdjacent];
                }
                if row == rows - 1 {
                    score += sign * w[Feature::BottomRow];
                }
                score += sign * w[Feature::HeightPenalty] * height_factor;
            }

            // Edge columns count once per row per side.
            let edges = [board.get(row, 0), board.get(row, cols - 1)];
            if edges.contains(&player.to_cell()) {
                score += w[Feature::EdgePenalty];
            }
            if edges.contains(&player.other().to_cell()) {
                score -= w[Feature::EdgePenalty];
            }
        }
        score
    }
}

impl Heuristic for AdaptiveHeuristic<'_> {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let w = self.weights;
        let mut score = self.positional(board, player);
        let mut tally = PatternTally::default();

        for window in board.windows() {
            let counts = board.count_window(&window, player);
            score += self.score_window(counts);
            tally.record(board, &window, counts);
        }

        score += tally.own_threes as f64 * w[Feature::ThreatCount];
        score += tally.opp_threes as f64 * w[Feature::OppThreatCount];
        score += tally.own_open_twos as f64 * w[Feature::TwoOpen];
        score += tally.opp_open_twos as f64 * w[Feature::OppTwoOpen];

        if tally.own_threes >= 2 {
            score += w[Feature::DoubleThreat];
        }
        if tally.opp_threes >= 2 {
            score -= w[Feature::DoubleThreat] * OPP_DOUBLE_THREAT_FACTOR;
        }

        score += board.legal_moves().len() as f64 * w[Feature::Mobility];
        score
    }
}

/// Threat and two-in-a-row counts for both sides of one position.
///
/// Threes (three pieces plus one empty) are counted along all four
/// directions. Twos and open twos are counted on rows only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternTally {
    pub own_threes: usize,
    pub opp_threes: usize,
    pub own_twos: usize,
    pub opp_twos: usize,
    pub own_open_twos: usize,
    pub opp_open_twos: usize,
}

impl PatternTally {
    /// Tally every window of `board` from `player`'s point of view.
    pub fn scan(board: &Board, player: Player) -> Self {
        let mut tally = PatternTally::default();
        for window in board.windows() {
            let counts = board.count_window(&window, player);
            tally.record(board, &window, counts);
        }
        tally
    }

    fn record(&mut self, board: &Board, window: &Window, counts: WindowCounts) {
        if counts.own_line(3) {
            self.own_threes += 1;
        }
        if counts.opp_line(3) {
            self.opp_threes += 1;
        }
        if window.direction != Direction::Horizontal {
            return;
        }
        let open = has_open_flanks(board, window);
        if counts.own_line(2) {
            self.own_twos += 1;
            if open {
                self.own_open_twos += 1;
            }
        }
        if counts.opp_line(2) {
            self.opp_twos += 1;
            if open {
                self.opp_open_twos += 1;
            }
        }
    }
}

/// Both cells just outside a horizontal window exist and are empty.
fn has_open_flanks(board: &Board, window: &Window) -> bool {
    let (row, col) = window.start;
    let after = col + crate::game::CONNECT;
    col > 0 && after < board.cols() && board.get(row, col - 1).is_empty() && board.get(row, after).is_empty()
}
