//! NxN TicTacToe board and win detection
//!
//! This crate holds everything the search engine and the offline game need
//! to know about the board itself: the two symbols, a row-major NxN grid,
//! and the win detector that scans it.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::{detect_win, Board, Player};
//!
//! let board: Board = "XXX/OO./...".parse().unwrap();
//! let line = detect_win(&board, Player::X).unwrap();
//! assert_eq!(line, vec![0, 1, 2]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod game;

pub use game::{Game, MoveError};

/// Ordered cell indices forming a complete line.
pub type WinningLine = Vec<usize>;

/// One of the two symbols on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The other symbol.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            other => Err(BoardError::InvalidPlayer(other.to_string())),
        }
    }
}

/// Errors raised while building a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board has no cells")]
    Empty,

    #[error("Board has {0} cells, which is not a perfect square")]
    NotSquare(usize),

    #[error("Invalid cell character: {0:?}")]
    InvalidCell(char),

    #[error("Invalid player: {0:?} (expected X or O)")]
    InvalidPlayer(String),
}

/// Result of inspecting a board for a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    InProgress,
    Won { winner: Player, line: WinningLine },
    Draw,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Square board of `size * size` cells, indexed row-major
/// (`index = row * size + col`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl Board {
    /// Create an empty board with `size` rows and columns.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from raw cells. The length must be a non-zero perfect square.
    pub fn from_cells(cells: Vec<Option<Player>>) -> Result<Self, BoardError> {
        if cells.is_empty() {
            return Err(BoardError::Empty);
        }
        let size = integer_sqrt(cells.len()).ok_or(BoardError::NotSquare(cells.len()))?;
        Ok(Self { size, cells })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Player>] {
        &self.cells
    }

    /// Cell contents, or `None` when the cell is empty or out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    pub fn is_cell_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    /// Indices of all empty cells, ascending.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Set a cell in place. Callers are responsible for legality.
    #[inline]
    pub fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = Some(player);
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    /// Copy of this board with `index` set to `player`.
    pub fn with_move(&self, index: usize, player: Player) -> Board {
        let mut next = self.clone();
        next.place(index, player);
        next
    }

    /// First complete line owned by `player`, see [`detect_win`].
    pub fn winning_line(&self, player: Player) -> Option<WinningLine> {
        detect_win(self, player)
    }

    /// Finished-game check. X is scanned before O; a full board without a
    /// line is a draw.
    pub fn outcome(&self) -> Outcome {
        for player in [Player::X, Player::O] {
            if let Some(line) = detect_win(self, player) {
                return Outcome::Won {
                    winner: player,
                    line,
                };
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

/// Scan `board` for `size` consecutive cells owned by `player`.
///
/// Rows are scanned first (top to bottom), then columns (left to right),
/// then the main diagonal and finally the anti-diagonal. The first complete
/// line found is returned in scan order.
pub fn detect_win(board: &Board, player: Player) -> Option<WinningLine> {
    let n = board.size;
    if n == 0 {
        return None;
    }
    let owned = |idx: usize| board.cells[idx] == Some(player);

    for row in 0..n {
        let line: WinningLine = (0..n).map(|col| row * n + col).collect();
        if line.iter().all(|&idx| owned(idx)) {
            return Some(line);
        }
    }

    for col in 0..n {
        let line: WinningLine = (0..n).map(|row| row * n + col).collect();
        if line.iter().all(|&idx| owned(idx)) {
            return Some(line);
        }
    }

    let main: WinningLine = (0..n).map(|i| i * n + i).collect();
    if main.iter().all(|&idx| owned(idx)) {
        return Some(main);
    }

    let anti: WinningLine = (0..n).map(|i| i * n + (n - 1 - i)).collect();
    if anti.iter().all(|&idx| owned(idx)) {
        return Some(anti);
    }

    None
}

fn integer_sqrt(len: usize) -> Option<usize> {
    let mut root = (len as f64).sqrt() as usize;
    // Correct for float rounding on large inputs
    while root * root > len {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= len {
        root += 1;
    }
    (root * root == len).then_some(root)
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the text form: `X`, `O`, and `.`, `_` or `-` for empty cells.
    /// Whitespace, `|` and `/` are separators and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .map(|c| match c {
                'x' | 'X' => Ok(Some(Player::X)),
                'o' | 'O' => Ok(Some(Player::O)),
                '.' | '_' | '-' => Ok(None),
                other => Err(BoardError::InvalidCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_cells(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(self.size.max(1)).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                let c = cell.map(Player::symbol).unwrap_or('.');
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
