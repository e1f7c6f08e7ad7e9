use std::fmt;

use super::{Cell, GameOutcome, MoveError, MoveOutcome, Player};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

/// The four axes a line of pieces can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right (`\`).
    DiagonalDown,
    /// Bottom-left to top-right (`/`).
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row, col) step between consecutive cells. Row 0 is the top.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// A run of [`CONNECT`] cells, identified by its first cell and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub direction: Direction,
    pub start: (usize, usize),
}

impl Window {
    pub fn positions(&self) -> [(usize, usize); CONNECT] {
        let (dr, dc) = self.direction.delta();
        let (row, col) = (self.start.0 as isize, self.start.1 as isize);
        std::array::from_fn(|i| {
            let i = i as isize;
            ((row + dr * i) as usize, (col + dc * i) as usize)
        })
    }
}

/// Piece tally of one window from a given player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCounts {
    pub own: usize,
    pub opp: usize,
    pub empty: usize,
}

impl WindowCounts {
    /// Both players have a piece in the window, so nobody can complete it.
    pub fn is_dead(&self) -> bool {
        self.own > 0 && self.opp > 0
    }

    /// `n` own pieces and the rest empty.
    pub fn own_line(&self, n: usize) -> bool {
        self.own == n && self.empty == CONNECT - n
    }

    /// `n` opponent pieces and the rest empty.
    pub fn opp_line(&self, n: usize) -> bool {
        self.opp == n && self.empty == CONNECT - n
    }
}

/// Connect Four grid with gravity, turn tracking and terminal detection.
///
/// Cloning is a deep copy: the clone owns its own cell storage, so search
/// can mutate hypothetical continuations without touching the live game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    turn: Player,
    terminal: bool,
    move_count: usize,
}

impl Board {
    /// Create a new empty 6x7 board with player one to move.
    pub fn new() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![Cell::Empty; ROWS * COLS],
            turn: Player::One,
            terminal: false,
            move_count: 0,
        }
    }

    /// Create an empty board of custom size. Returns `None` if either
    /// dimension is too small to hold a winning line.
    pub fn with_size(rows: usize, cols: usize) -> Option<Self> {
        if rows < CONNECT || cols < CONNECT {
            return None;
        }
        Some(Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            turn: Player::One,
            terminal: false,
            move_count: 0,
        })
    }

    /// Replay a sequence of column drops from the empty 6x7 board.
    pub fn from_moves(moves: &[usize]) -> Result<Self, MoveError> {
        let mut board = Board::new();
        for &column in moves {
            if let MoveOutcome::Rejected(err) = board.apply_move(column) {
                return Err(err);
            }
        }
        Ok(board)
    }

    /// Build a position from text rows, top row first. `X` is player one,
    /// `O` is player two and `.` is empty.
    ///
    /// Returns `None` for ragged or undersized grids, unknown characters,
    /// floating pieces, or impossible piece counts.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let cols = rows.first()?.chars().count();
        let mut board = Board::with_size(rows.len(), cols)?;
        let (mut ones, mut twos) = (0usize, 0usize);

        for (r, line) in rows.iter().enumerate() {
            if line.chars().count() != cols {
                return None;
            }
            for (c, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    'X' | 'x' => {
                        ones += 1;
                        Cell::PlayerOne
                    }
                    'O' | 'o' => {
                        twos += 1;
                        Cell::PlayerTwo
                    }
                    _ => return None,
                };
                board.cells[r * cols + c] = cell;
            }
        }

        // Gravity: nothing may sit above an empty cell.
        for c in 0..cols {
            for r in 0..board.rows - 1 {
                if !board.get(r, c).is_empty() && board.get(r + 1, c).is_empty() {
                    return None;
                }
            }
        }

        board.turn = match ones.checked_sub(twos)? {
            0 => Player::One,
            1 => Player::Two,
            _ => return None,
        };
        board.move_count = ones + twos;
        if let Some(winner) = board.winner() {
            board.turn = winner;
            board.terminal = true;
        } else if board.is_full() {
            board.turn = board.turn.other();
            board.terminal = true;
        }
        Some(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Player to move next. After a win or draw this stays on the player
    /// who made the final move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Number of accepted moves so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, the last row is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Independent deep copy of this board.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.cols || !self.get(0, col).is_empty()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Row a piece dropped into `col` would land on.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col).is_empty())
    }

    /// Drop the current player's piece into `column`.
    pub fn apply_move(&mut self, column: usize) -> MoveOutcome {
        if self.terminal {
            return MoveOutcome::Rejected(MoveError::GameOver);
        }
        if column >= self.cols {
            return MoveOutcome::Rejected(MoveError::InvalidColumn);
        }
        let Some(row) = self.landing_row(column) else {
            return MoveOutcome::Rejected(MoveError::ColumnFull);
        };

        let player = self.turn;
        self.set(row, column, player.to_cell());
        self.move_count += 1;

        let cells = self.connected_cells(row, column);
        if !cells.is_empty() {
            self.terminal = true;
            return MoveOutcome::Win { player, cells };
        }
        if self.is_full() {
            self.terminal = true;
            return MoveOutcome::Draw;
        }

        self.turn = player.other();
        MoveOutcome::Accepted
    }

    /// Cells of every line of [`CONNECT`] or more through (row, col) that
    /// belong to the piece's owner. Empty if the piece does not win.
    pub fn connected_cells(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let cell = self.get(row, col);
        if cell.is_empty() {
            return Vec::new();
        }

        let mut winning = Vec::new();
        for direction in Direction::ALL {
            let run = self.run_through(row, col, cell, direction);
            if run.len() >= CONNECT {
                for pos in run {
                    if !winning.contains(&pos) {
                        winning.push(pos);
                    }
                }
            }
        }
        winning
    }

    /// Maximal contiguous run of `cell` through (row, col) along `direction`,
    /// ordered from the negative end to the positive end.
    fn run_through(
        &self,
        row: usize,
        col: usize,
        cell: Cell,
        direction: Direction,
    ) -> Vec<(usize, usize)> {
        let (dr, dc) = direction.delta();
        let walk = |sign: isize| {
            let mut out = Vec::new();
            let (mut r, mut c) = (row as isize + dr * sign, col as isize + dc * sign);
            while self.in_bounds(r, c) && self.get(r as usize, c as usize) == cell {
                out.push((r as usize, c as usize));
                r += dr * sign;
                c += dc * sign;
            }
            out
        };

        let mut run: Vec<(usize, usize)> = walk(-1).into_iter().rev().collect();
        run.push((row, col));
        run.extend(walk(1));
        run
    }

    fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Scan the whole board for a completed line.
    pub fn winner(&self) -> Option<Player> {
        self.windows().find_map(|window| {
            let [first, rest @ ..] = window.positions();
            let cell = self.get(first.0, first.1);
            if !cell.is_empty() && rest.iter().all(|&(r, c)| self.get(r, c) == cell) {
                cell.player()
            } else {
                None
            }
        })
    }

    /// True iff nobody has won and no column can take another piece.
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Result of a finished game, derived from the grid.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.winner() {
            Some(player) => Some(GameOutcome::Winner(player)),
            None if self.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Every window of [`CONNECT`] cells in all four directions.
    pub fn windows(&self) -> impl Iterator<Item = Window> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let span = CONNECT as isize - 1;
        Direction::ALL.into_iter().flat_map(move |direction| {
            let (dr, dc) = direction.delta();
            (0..rows)
                .flat_map(move |row| (0..cols).map(move |col| (row, col)))
                .filter(move |&(row, col)| {
                    let (end_r, end_c) = (row + dr * span, col + dc * span);
                    end_r >= 0 && end_r < rows && end_c >= 0 && end_c < cols
                })
                .map(move |(row, col)| Window {
                    direction,
                    start: (row as usize, col as usize),
                })
        })
    }

    /// Tally a window from `player`'s point of view.
    pub fn count_window(&self, window: &Window, player: Player) -> WindowCounts {
        let own_cell = player.to_cell();
        let mut counts = WindowCounts::default();
        for (r, c) in window.positions() {
            match self.get(r, c) {
                Cell::Empty => counts.empty += 1,
                cell if cell == own_cell => counts.own += 1,
                _ => counts.opp += 1,
            }
        }
        counts
    }

    /// Number of `player`'s pieces on the board.
    pub fn count_pieces(&self, player: Player) -> usize {
        let cell = player.to_cell();
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols).map(|col| self.get(row, col).symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
