use regicide::board::{Board, START_FEN};
use regicide::movegen::{all_moves, perft};

#[test]
fn test_perft_startpos_shallow() {
    regicide::init();
    let board = Board::from_fen(START_FEN).unwrap();
    // no captures are possible in the first two plies
    assert_eq!(perft(&board, 1), 20);
    assert_eq!(perft(&board, 2), 400);
}

#[test]
fn test_perft_does_not_mutate_board() {
    regicide::init();
    let board = Board::startpos();
    let before = board.clone();
    perft(&board, 3);
    assert_eq!(board, before);
}

#[test]
fn test_perft_king_capture_ends_line() {
    regicide::init();
    // lone kings adjacent: white can take the black king or step elsewhere
    let board = Board::from_fen("8/8/8/3k4/3K4/8/8/8 w").unwrap();
    let moves = all_moves(&board);
    assert_eq!(moves.len(), 8);
    // 7 quiet king moves, each followed by black's replies, plus the capture leaf
    let depth2 = perft(&board, 2);
    let mut expected = 0;
    for (from, to) in moves {
        let mut child = board.clone();
        child.apply_move(from, to).unwrap();
        expected += if child.is_game_over() { 1 } else { all_moves(&child).len() as u64 };
    }
    assert_eq!(depth2, expected);
}
