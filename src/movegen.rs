//! Destination generation for the king-capture rule set.
//!
//! Generation only reads the board. There is no check filtering: a move that
//! leaves the mover's king en prise is still legal, and capturing a king ends
//! the game (see `Board::apply_move`).

use crate::board::{Board, Color, PieceKind, Square, SquareSet};
use crate::utils::{self, BISHOP_DIRS, QUEEN_DIRS, ROOK_DIRS};

/// Destinations for the piece on `from`. Empty when the square is empty, off
/// the board, or holds a piece of the side not to move.
pub fn legal_moves(board: &Board, from: Square) -> SquareSet {
    match board.get(from) {
        Some(piece) if piece.color == board.side_to_move() => {
            generate(piece.kind, from, piece.color, board)
        }
        _ => SquareSet::EMPTY,
    }
}

pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    legal_moves(board, from).contains(to)
}

/// Destinations for a `kind` piece of `color` standing on `from`, regardless of
/// whose turn it is.
pub fn generate(kind: PieceKind, from: Square, color: Color, board: &Board) -> SquareSet {
    if !from.is_on_board() {
        return SquareSet::EMPTY;
    }
    match kind {
        PieceKind::Pawn => pawn_moves(board, from, color),
        PieceKind::Knight => leaper_moves(board, from, color, utils::knight_targets),
        PieceKind::King => leaper_moves(board, from, color, utils::king_targets),
        PieceKind::Rook => sliding_moves(board, from, color, &ROOK_DIRS),
        PieceKind::Bishop => sliding_moves(board, from, color, &BISHOP_DIRS),
        PieceKind::Queen => sliding_moves(board, from, color, &QUEEN_DIRS),
    }
}

fn pawn_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let dir = color.forward();

    let one = from.offset(dir, 0);
    if one.is_on_board() && board.is_empty(one) {
        moves.insert(one);
        let two = from.offset(2 * dir, 0);
        if from.row == color.pawn_home_row() && two.is_on_board() && board.is_empty(two) {
            moves.insert(two);
        }
    }

    for d_col in [-1, 1] {
        let target = from.offset(dir, d_col);
        if matches!(board.get(target), Some(p) if p.color != color) {
            moves.insert(target);
        }
    }

    moves
}

fn leaper_moves(board: &Board, from: Square, color: Color, table: fn(usize) -> u64) -> SquareSet {
    match from.index() {
        Some(idx) => SquareSet(table(idx) & !board.occupancy(color).0),
        None => SquareSet::EMPTY,
    }
}

fn sliding_moves(board: &Board, from: Square, color: Color, dirs: &[(i32, i32)]) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    for &(d_row, d_col) in dirs {
        let mut cur = from.offset(d_row, d_col);
        while cur.is_on_board() {
            match board.get(cur) {
                None => moves.insert(cur),
                Some(p) => {
                    if p.color != color {
                        moves.insert(cur);
                    }
                    break;
                }
            }
            cur = cur.offset(d_row, d_col);
        }
    }
    moves
}

/// Number of move sequences of length `depth` from `board`. A king capture is
/// a leaf: the game is over and nothing follows it.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for (from, to) in all_moves(board) {
        let mut child = board.clone();
        if child.apply_move(from, to).is_err() {
            continue;
        }
        nodes += if child.is_game_over() {
            1
        } else {
            perft(&child, depth - 1)
        };
    }
    nodes
}

/// Every (from, to) pair available to the side to move.
pub fn all_moves(board: &Board) -> Vec<(Square, Square)> {
    if board.is_game_over() {
        return Vec::new();
    }
    let side = board.side_to_move();
    let mut out = Vec::with_capacity(48);
    for (from, piece) in board.pieces().filter(|(_, p)| p.color == side) {
        for to in generate(piece.kind, from, side, board).iter() {
            out.push((from, to));
        }
    }
    out
}
