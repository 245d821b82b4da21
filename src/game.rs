//! Game session: owns the board and is the only place moves are validated
//! before they are applied.

use crate::board::{Board, Color, MoveError, MoveOutcome, Square, SquareSet};
use crate::movegen;

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Fresh game from the starting layout.
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    pub fn legal_moves(&self, from: Square) -> SquareSet {
        movegen::legal_moves(&self.board, from)
    }

    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        movegen::is_legal(&self.board, from, to)
    }

    /// Apply `from -> to` if the generator allows it. The board is untouched on error.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.board.is_game_over() {
            return Err(MoveError::GameAlreadyOver);
        }
        if !self.is_legal(from, to) {
            return Err(MoveError::InvalidMove { from, to });
        }
        self.board.apply_move(from, to)
    }
}
