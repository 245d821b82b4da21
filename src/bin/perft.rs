use clap::Parser;
use regicide::board::{Board, START_FEN};
use regicide::movegen::{all_moves, perft};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count move sequences under king-capture rules", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,
}

fn main() {
    let args = Args::parse();
    regicide::init();

    let board = match Board::from_fen(&args.fen) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("invalid FEN '{}': {}", args.fen, e);
            std::process::exit(2);
        }
    };

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let start = std::time::Instant::now();
    let nodes = if args.divide && args.depth > 0 {
        let mut total = 0;
        for (from, to) in all_moves(&board) {
            let mut child = board.clone();
            if child.apply_move(from, to).is_err() {
                continue;
            }
            let n = if child.is_game_over() {
                1
            } else {
                perft(&child, args.depth - 1)
            };
            println!("{}{}: {}", from, to, n);
            total += n;
        }
        total
    } else {
        perft(&board, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
}
