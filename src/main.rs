//! Regicide text front end: reads commands on stdin, answers on stdout.

use clap::Parser;
use regicide::board::{Board, START_FEN};
use regicide::game::Game;
use regicide::protocol::{run_session_loop, Session, SessionOptions};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position: piece placement and side to move
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Draw pieces with Unicode chess symbols
    #[arg(short, long)]
    glyphs: bool,

    /// Emit `info string` diagnostics
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    regicide::init();

    let board = match Board::from_fen(&args.fen) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("invalid --fen '{}': {}", args.fen, e);
            std::process::exit(2);
        }
    };

    let options = SessionOptions {
        debug: args.debug,
        glyphs: args.glyphs,
        ..SessionOptions::default()
    };
    let mut session = Session::with_game(Game::from_board(board), options);

    if let Err(e) = run_session_loop(&mut session) {
        eprintln!("session loop failed: {:?}", e);
        std::process::exit(1);
    }
}
