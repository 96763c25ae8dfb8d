//! Offline game session: a human against the computer on one board.
//!
//! The session only arbitrates moves. Choosing the computer's reply is the
//! caller's job (see the `mcts` crate).

use thiserror::Error;

use crate::{detect_win, Board, Outcome, Player};

/// Reasons a move is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Game is already over")]
    GameOver,

    #[error("Cell {index} is outside the board ({cells} cells)")]
    OutOfRange { index: usize, cells: usize },

    #[error("Cell {0} is already occupied")]
    Occupied(usize),
}

/// State of one offline game. X always moves first.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<usize>,
    outcome: Outcome,
}

impl Game {
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            to_move: Player::X,
            history: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    #[inline]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Place the side-to-move's symbol on `index`.
    ///
    /// The mover is checked for a completed line first, then the board for
    /// a draw. Otherwise the turn passes to the other side.
    pub fn play(&mut self, index: usize) -> Result<Outcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if index >= self.board.len() {
            return Err(MoveError::OutOfRange {
                index,
                cells: self.board.len(),
            });
        }
        if !self.board.is_cell_empty(index) {
            return Err(MoveError::Occupied(index));
        }

        let mover = self.to_move;
        self.board.place(index, mover);
        self.history.push(index);

        self.outcome = if let Some(line) = detect_win(&self.board, mover) {
            Outcome::Won {
                winner: mover,
                line,
            }
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            self.to_move = mover.opponent();
            Outcome::InProgress
        };

        Ok(self.outcome.clone())
    }

    /// Take back the last two moves (the computer's reply and the human
    /// move before it). Only allowed while the game is running and at least
    /// two moves exist; returns whether anything was undone.
    pub fn undo_round(&mut self) -> bool {
        if self.history.len() < 2 || self.is_over() {
            return false;
        }

        for _ in 0..2 {
            if let Some(index) = self.history.pop() {
                self.board.clear(index);
            }
        }
        // X always starts, so history parity decides the side to move
        self.to_move = if self.history.len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };
        true
    }
}
