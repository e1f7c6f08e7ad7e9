//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search is written as explicit MAX/MIN recursion from the point of
//! view of one fixed player, so the evaluator is always called with that
//! player and never negated. Moves are tried in ascending column order and
//! the root keeps the first column that reaches the best value, which makes
//! the chosen move fully deterministic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{Board, Player};

use super::heuristic::Heuristic;

/// Value of a won position. Far above anything the evaluators produce.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Search depth presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Plies searched at this difficulty.
    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty '{s}' (expected easy, medium or hard)"))
    }
}

/// Outcome of a search from the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Lowest column achieving `value`; `None` when the root has no moves.
    pub best_move: Option<usize>,
    pub value: f64,
    /// Nodes visited below the root.
    pub nodes: u64,
}

/// Alpha-beta search for `player` to `depth` plies (at least one).
///
/// Returns no move for a finished game or a board without legal moves.
pub fn alpha_beta<H: Heuristic + ?Sized>(
    board: &Board,
    player: Player,
    depth: usize,
    heuristic: &H,
) -> SearchResult {
    Searcher::new(heuristic, player, true).root(board, depth)
}

/// Plain minimax with the same terminal and evaluation rules as
/// [`alpha_beta`] but no pruning. Useful as a reference.
pub fn minimax<H: Heuristic + ?Sized>(
    board: &Board,
    player: Player,
    depth: usize,
    heuristic: &H,
) -> SearchResult {
    Searcher::new(heuristic, player, false).root(board, depth)
}

struct Searcher<'h, H: ?Sized> {
    heuristic: &'h H,
    player: Player,
    prune: bool,
    nodes: u64,
}

impl<'h, H: Heuristic + ?Sized> Searcher<'h, H> {
    fn new(heuristic: &'h H, player: Player, prune: bool) -> Self {
        Searcher {
            heuristic,
            player,
            prune,
            nodes: 0,
        }
    }

    fn root(mut self, board: &Board, depth: usize) -> SearchResult {
        let depth = depth.max(1);
        if board.is_terminal() {
            return SearchResult {
                best_move: None,
                value: self.terminal_value(board, depth).unwrap_or(0.0),
                nodes: 0,
            };
        }

        let mut best_move = None;
        let mut best_value = f64::NEG_INFINITY;
        for column in board.legal_moves() {
            let child = Self::result(board, column);
            let value = self.min_value(&child, depth - 1, f64::NEG_INFINITY, f64::INFINITY);
            if value > best_value {
                best_value = value;
                best_move = Some(column);
            }
        }

        SearchResult {
            best_move,
            value: best_value,
            nodes: self.nodes,
        }
    }

    /// Board after dropping into `column`, leaving `board` untouched.
    fn result(board: &Board, column: usize) -> Board {
        let mut child = board.copy();
        child.apply_move(column);
        child
    }

    /// Score for finished games. Wins found with more depth left (sooner)
    /// score higher so the search never postpones a win it can take now.
    fn terminal_value(&self, board: &Board, depth: usize) -> Option<f64> {
        if !board.is_terminal() {
            return None;
        }
        match board.winner() {
            Some(winner) if winner == self.player => Some(WIN_SCORE + depth as f64),
            Some(_) => Some(-(WIN_SCORE + depth as f64)),
            None if board.is_full() => Some(0.0),
            None => None,
        }
    }

    fn max_value(&mut self, board: &Board, depth: usize, mut alpha: f64, beta: f64) -> f64 {
        self.nodes += 1;
        if let Some(value) = self.terminal_value(board, depth) {
            return value;
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, self.player);
        }

        let mut v = f64::NEG_INFINITY;
        for column in board.legal_moves() {
            let child = Self::result(board, column);
            v = v.max(self.min_value(&child, depth - 1, alpha, beta));
            if self.prune && v >= beta {
                return v;
            }
            alpha = alpha.max(v);
        }
        v
    }

    fn min_value(&mut self, board: &Board, depth: usize, alpha: f64, mut beta: f64) -> f64 {
        self.nodes += 1;
        if let Some(value) = self.terminal_value(board, depth) {
            return value;
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, self.player);
        }

        let mut v = f64::INFINITY;
        for column in board.legal_moves() {
            let child = Self::result(board, column);
            v = v.min(self.max_value(&child, depth - 1, alpha, beta));
            if self.prune && v <= alpha {
                return v;
            }
            beta = beta.min(v);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::adaptive::Weights;
    use crate::ai::heuristic::{AdaptiveHeuristic, ClassicHeuristic};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_position(rng: &mut StdRng, plies: usize) -> Board {
        let mut board = Board::new();
        for _ in 0..plies {
            let moves = board.legal_moves();
            let mut next = board.copy();
            next.apply_move(moves[rng.random_range(0..moves.len())]);
            if next.is_terminal() {
                break;
            }
            board = next;
        }
        board
    }

    #[test]
    fn difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 2);
        assert_eq!(Difficulty::Medium.depth(), 4);
        assert_eq!(Difficulty::Hard.depth(), 6);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn takes_immediate_win_at_every_depth() {
        // X holds the bottom row 0..3; O sits on top of it. Column 3 wins.
        let board = Board::from_moves(&[0, 0, 1, 1, 2, 2]).unwrap();
        let h = ClassicHeuristic::default();
        for depth in 1..=5 {
            let result = alpha_beta(&board, Player::One, depth, &h);
            assert_eq!(result.best_move, Some(3), "depth {depth}");
            assert!(result.value >= WIN_SCORE);
        }
    }

    #[test]
    fn takes_immediate_win_with_adaptive_weights() {
        let board = Board::from_moves(&[6, 0, 6, 0, 6, 0]).unwrap();
        let weights = Weights::defaults();
        let h = AdaptiveHeuristic::new(&weights);
        for depth in 1..=4 {
            let result = alpha_beta(&board, Player::One, depth, &h);
            assert_eq!(result.best_move, Some(6), "depth {depth}");
        }
    }

    #[test]
    fn blocks_opponent_win() {
        // O holds bottom 0..3 after X wasted moves on the right.
        let board = Board::from_moves(&[6, 0, 6, 1, 5, 2]).unwrap();
        let result = alpha_beta(&board, Player::One, 2, &ClassicHeuristic::default());
        assert_eq!(result.best_move, Some(3));
    }

    #[test]
    fn prefers_win_over_block() {
        // Both sides threaten column 3; X is to move.
        let board = Board::from_moves(&[0, 0, 1, 1, 2, 2]).unwrap();
        let result = alpha_beta(&board, Player::One, 4, &ClassicHeuristic::default());
        assert_eq!(result.best_move, Some(3));
    }

    #[test]
    fn tie_break_picks_lowest_column() {
        struct Flat;
        impl Heuristic for Flat {
            fn evaluate(&self, _board: &Board, _player: Player) -> f64 {
                0.0
            }
        }
        let result = alpha_beta(&Board::new(), Player::One, 3, &Flat);
        assert_eq!(result.best_move, Some(0));
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn terminal_board_has_no_move() {
        let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        let result = alpha_beta(&board, Player::Two, 4, &ClassicHeuristic::default());
        assert_eq!(result.best_move, None);
        assert!(result.value <= -WIN_SCORE);
    }

    #[test]
    fn search_does_not_mutate_board() {
        let board = Board::from_moves(&[3, 3, 4]).unwrap();
        let before = board.clone();
        alpha_beta(&board, Player::Two, 4, &ClassicHeuristic::default());
        assert_eq!(board, before);
    }

    #[test]
    fn pruning_matches_minimax() {
        let mut rng = StdRng::seed_from_u64(0xC4);
        let weights = Weights::defaults();
        let adaptive = AdaptiveHeuristic::new(&weights);
        let classic = ClassicHeuristic::default();

        for plies in [0, 3, 7, 12, 18, 25] {
            let board = random_position(&mut rng, plies);
            let player = board.turn();
            for depth in 1..=3 {
                let pruned = alpha_beta(&board, player, depth, &classic);
                let full = minimax(&board, player, depth, &classic);
                assert_eq!(pruned.best_move, full.best_move);
                assert_eq!(pruned.value, full.value);
                assert!(pruned.nodes <= full.nodes);

                let pruned = alpha_beta(&board, player, depth, &adaptive);
                let full = minimax(&board, player, depth, &adaptive);
                assert_eq!(pruned.best_move, full.best_move);
                assert_eq!(pruned.value, full.value);
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let board = Board::new();
        let h = ClassicHeuristic::default();
        let pruned = alpha_beta(&board, Player::One, 4, &h);
        let full = minimax(&board, Player::One, 4, &h);
        assert!(pruned.nodes < full.nodes);
        // 7 + 49 + 343 + 2401 nodes below the root
        assert_eq!(full.nodes, 2800);
    }
}
