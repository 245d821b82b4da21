// Board model: row 0 is black's back rank (rank 8), row 7 is white's (rank 1).
// Square index = row * 8 + col, so a SquareSet bit reads top-left to bottom-right.

use std::fmt;
use std::str::FromStr;

use shakmaty::{File, Rank};

/// Initial layout. King sits on the d-file and queen on the e-file for both sides.
pub const START_FEN: &str = "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR w";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_home_row(self) -> i32 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        let ch = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}

/// A (row, col) coordinate. Off-board values are allowed so neighbours of edge
/// squares can be probed without special casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// Bit index in [0, 64), or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some((self.row * 8 + self.col) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Square::index`]; callers pass values below 64.
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 64);
        Self::new((idx / 8) as i32, (idx % 8) as i32)
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn to_shakmaty(self) -> Option<shakmaty::Square> {
        if !self.is_on_board() {
            return None;
        }
        Some(shakmaty::Square::from_coords(
            File::new(self.col as u32),
            Rank::new((7 - self.row) as u32),
        ))
    }

    pub fn from_shakmaty(sq: shakmaty::Square) -> Self {
        // shakmaty indexes a1 = 0 .. h8 = 63
        let idx = sq as i32;
        Self::new(7 - idx / 8, idx % 8)
    }
}

impl FromStr for Square {
    type Err = &'static str;

    /// Parse algebraic notation ("e2").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<shakmaty::Square>()
            .map(Square::from_shakmaty)
            .map_err(|_| "invalid square notation")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_shakmaty() {
            Some(sq) => write!(f, "{}", sq),
            None => write!(f, "({},{})", self.row, self.col),
        }
    }
}

/// Set of on-board squares packed into a u64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Off-board squares are dropped.
    pub fn insert(&mut self, sq: Square) {
        if let Some(idx) = sq.index() {
            self.0 |= 1u64 << idx;
        }
    }

    pub fn contains(self, sq: Square) -> bool {
        sq.index().is_some_and(|idx| self.0 & (1u64 << idx) != 0)
    }

    pub fn len(self) -> usize {
        crate::utils::count_bits(self.0) as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ascending index order: row by row from the top, left to right.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        crate::utils::iter_bits(self.0).map(Square::from_index)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for sq in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", sq)?;
            first = false;
        }
        Ok(())
    }
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Play goes on; carries the new side to move.
    Continued(Color),
    /// A king was captured; carries the winning side.
    GameEnded(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    InvalidMove { from: Square, to: Square },
    GameAlreadyOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMove { from, to } => write!(f, "illegal move {}{}", from, to),
            MoveError::GameAlreadyOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    pub side: Color,
    game_over: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, white to move.
    pub fn new() -> Self {
        Self {
            squares: [None; 64],
            side: Color::White,
            game_over: false,
        }
    }

    /// The fixed starting layout.
    pub fn startpos() -> Self {
        let mut board = Self::new();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i32;
            board.set(Square::new(0, col), Some(Piece::new(kind, Color::Black)));
            board.set(Square::new(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.set(Square::new(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.set(Square::new(7, col), Some(Piece::new(kind, Color::White)));
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        sq.index().and_then(|idx| self.squares[idx])
    }

    /// Writes outside the board are ignored.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(idx) = sq.index() {
            self.squares[idx] = piece;
        }
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    pub fn side_to_move(&self) -> Color {
        self.side
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The capturing side never hands over the move, so once the game is over
    /// the side to move is the winner.
    pub fn winner(&self) -> Option<Color> {
        if self.game_over {
            Some(self.side)
        } else {
            None
        }
    }

    /// Squares occupied by `color`.
    pub fn occupancy(&self, color: Color) -> SquareSet {
        let mut bb = 0u64;
        for (idx, piece) in self.squares.iter().enumerate() {
            if matches!(piece, Some(p) if p.color == color) {
                bb |= 1u64 << idx;
            }
        }
        SquareSet(bb)
    }

    /// Every occupied square with its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| p.map(|p| (Square::from_index(idx), p)))
    }

    /// Move the side to move's piece on `from` to `to`. Rule legality is the
    /// caller's business (see `Game::apply_move`); structural misuse (empty or
    /// foreign origin, null move, off-board or own-occupied target) is rejected.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameAlreadyOver);
        }
        let mover = match self.get(from) {
            Some(p) if p.color == self.side && to.is_on_board() && from != to => p,
            _ => return Err(MoveError::InvalidMove { from, to }),
        };
        let target = self.get(to);
        if matches!(target, Some(t) if t.color == mover.color) {
            return Err(MoveError::InvalidMove { from, to });
        }

        self.set(to, Some(mover));
        self.set(from, None);

        if matches!(target, Some(t) if t.kind == PieceKind::King) {
            self.game_over = true;
            return Ok(MoveOutcome::GameEnded(mover.color));
        }

        self.side = self.side.opposite();
        Ok(MoveOutcome::Continued(self.side))
    }

    /// Text rendering, rank 8 first, with rank and file labels.
    pub fn render(&self, glyphs: bool) -> Vec<String> {
        let mut lines = Vec::with_capacity(9);
        for row in 0..8 {
            let mut line = format!("{} ", 8 - row);
            for col in 0..8 {
                let ch = match self.get(Square::new(row, col)) {
                    Some(p) if glyphs => p.glyph(),
                    Some(p) => p.fen_char(),
                    None => '.',
                };
                line.push(ch);
                if col < 7 {
                    line.push(' ');
                }
            }
            lines.push(line);
        }
        lines.push("  a b c d e f g h".to_string());
        lines
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

// FEN-style setup: piece placement and side to move. Trailing fields
// (castling, en-passant, clocks) are accepted and ignored.
impl Board {
    pub fn set_from_fen(&mut self, fen: &str) -> Result<(), &'static str> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or("missing pieces")?;
        let side_part = parts.next().ok_or("missing side")?;

        let side = match side_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err("invalid side char"),
        };

        let mut squares = [None; 64];
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err("expected 8 ranks");
        }
        for (row, rank_part) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank_part.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err("invalid empty-square count");
                    }
                    col += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(ch).ok_or("invalid piece char")?;
                    if col >= 8 {
                        return Err("rank too long");
                    }
                    squares[row * 8 + col] = Some(piece);
                    col += 1;
                }
                if col > 8 {
                    return Err("rank too long");
                }
            }
            if col != 8 {
                return Err("rank too short");
            }
        }

        self.squares = squares;
        self.side = side;
        self.game_over = false;
        Ok(())
    }

    pub fn from_fen(fen: &str) -> Result<Self, &'static str> {
        let mut board = Self::new();
        board.set_from_fen(fen)?;
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.get(Square::new(row, col)) {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        });
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render(false) {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_get_and_set() {
        let mut board = Board::startpos();
        let before = board.clone();
        for sq in [
            Square::new(-1, 0),
            Square::new(0, -1),
            Square::new(8, 3),
            Square::new(3, 8),
            Square::new(-5, 12),
        ] {
            assert_eq!(board.get(sq), None);
            board.set(sq, Some(Piece::new(PieceKind::Queen, Color::White)));
            assert_eq!(board.get(sq), None);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_startpos_matches_start_fen() {
        let parsed = Board::from_fen(START_FEN).unwrap();
        assert_eq!(parsed, Board::startpos());
        assert_eq!(Board::startpos().to_fen(), START_FEN);
    }

    #[test]
    fn test_fen_rejects_malformed_input() {
        assert_eq!(Board::from_fen("").unwrap_err(), "missing pieces");
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8").unwrap_err(), "missing side");
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8 x").unwrap_err(), "invalid side char");
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8 w").unwrap_err(), "expected 8 ranks");
        assert_eq!(Board::from_fen("9/8/8/8/8/8/8/8 w").unwrap_err(), "invalid empty-square count");
        assert_eq!(Board::from_fen("7/8/8/8/8/8/8/8 w").unwrap_err(), "rank too short");
        assert_eq!(Board::from_fen("ppppppppp/8/8/8/8/8/8/8 w").unwrap_err(), "rank too long");
        assert_eq!(Board::from_fen("7x/8/8/8/8/8/8/8 w").unwrap_err(), "invalid piece char");
    }

    #[test]
    fn test_failed_fen_leaves_board_untouched() {
        let mut board = Board::startpos();
        assert!(board.set_from_fen("8/8/8 w").is_err());
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn test_square_notation() {
        let e2: Square = "e2".parse().unwrap();
        assert_eq!(e2, Square::new(6, 4));
        assert_eq!(e2.to_string(), "e2");
        assert_eq!("a8".parse::<Square>().unwrap(), Square::new(0, 0));
        assert_eq!("h1".parse::<Square>().unwrap(), Square::new(7, 7));
        assert!("i9".parse::<Square>().is_err());
        assert_eq!(Square::new(9, -1).to_string(), "(9,-1)");
    }

    #[test]
    fn test_apply_move_flips_side() {
        let mut board = Board::startpos();
        let outcome = board.apply_move(Square::new(6, 4), Square::new(4, 4)).unwrap();
        assert_eq!(outcome, MoveOutcome::Continued(Color::Black));
        assert_eq!(board.side, Color::Black);
        assert_eq!(board.get(Square::new(6, 4)), None);
        assert_eq!(
            board.get(Square::new(4, 4)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_apply_move_from_empty_square_is_rejected() {
        let mut board = Board::startpos();
        let err = board.apply_move(Square::new(4, 4), Square::new(3, 4)).unwrap_err();
        assert!(matches!(err, MoveError::InvalidMove { .. }));
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn test_null_move_is_rejected() {
        let mut board = Board::startpos();
        let e2 = Square::new(6, 4);
        let d1 = Square::new(7, 3);
        assert_eq!(
            board.apply_move(e2, e2),
            Err(MoveError::InvalidMove { from: e2, to: e2 })
        );
        // a king standing still must not capture itself
        assert_eq!(
            board.apply_move(d1, d1),
            Err(MoveError::InvalidMove { from: d1, to: d1 })
        );
        assert!(!board.is_game_over());
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn test_moving_opponent_piece_is_rejected() {
        let mut board = Board::from_fen("3k4/8/8/8/8/8/8/3qK3 w").unwrap();
        let before = board.clone();
        let d1 = Square::new(7, 3);
        let e1 = Square::new(7, 4);
        assert_eq!(
            board.apply_move(d1, e1),
            Err(MoveError::InvalidMove { from: d1, to: e1 })
        );
        assert_eq!(board, before);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_capturing_own_piece_is_rejected() {
        let mut board = Board::startpos();
        let from = Square::new(7, 0);
        let to = Square::new(6, 0);
        assert!(board.apply_move(from, to).is_err());
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn test_king_capture_ends_game_without_flip() {
        let mut board = Board::from_fen("3k4/8/8/8/8/8/8/3RK3 w").unwrap();
        let outcome = board.apply_move(Square::new(7, 3), Square::new(0, 3)).unwrap();
        assert_eq!(outcome, MoveOutcome::GameEnded(Color::White));
        assert!(board.is_game_over());
        assert_eq!(board.side, Color::White);
        assert_eq!(board.winner(), Some(Color::White));
        assert_eq!(
            board.apply_move(Square::new(7, 4), Square::new(6, 4)),
            Err(MoveError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_render_labels() {
        let lines = Board::startpos().render(false);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 r n b k q b n r");
        assert_eq!(lines[7], "1 R N B K Q B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
        let glyphs = Board::startpos().render(true);
        assert_eq!(glyphs[1], "7 ♟ ♟ ♟ ♟ ♟ ♟ ♟ ♟");
    }
}
