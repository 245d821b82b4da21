pub mod board;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod utils;

pub use board::{Board, Color, MoveError, MoveOutcome, Piece, PieceKind, Square, SquareSet};
pub use game::Game;

pub fn init() {
    utils::init_attack_tables();
}
