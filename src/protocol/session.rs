//! Line-oriented session loop: the presentation side of the engine.
//!
//! The session owns a [`Game`] and a selection state. It turns commands into
//! queries and moves on the game and answers with plain text lines.

use super::options::SessionOptions;
use super::parser::{parse_command, Command};
use crate::board::{Board, MoveOutcome, Square, SquareSet};
use crate::game::Game;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selected { from: Square, targets: SquareSet },
}

pub struct Session {
    game: Game,
    selection: SelectionState,
    options: SessionOptions,
    running: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_game(Game::new(), SessionOptions::default())
    }

    pub fn with_game(game: Game, options: SessionOptions) -> Self {
        Self {
            game,
            selection: SelectionState::Idle,
            options,
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_command(&mut self, cmd: Command) -> Vec<String> {
        let mut res = Vec::new();
        match cmd {
            Command::NewGame => {
                self.reset(Game::new());
                if self.options.debug {
                    res.push("info string new game".to_string());
                }
                res.push(self.turn_line());
            }
            Command::Position { fen } => {
                let board = match fen {
                    None => Ok(Board::startpos()),
                    Some(f) => Board::from_fen(&f),
                };
                match board {
                    Ok(board) => {
                        self.reset(Game::from_board(board));
                        res.push(self.turn_line());
                    }
                    Err(e) => {
                        // keep the current game
                        res.push(format!("info string fen parse error: {}", e));
                    }
                }
            }
            Command::Show => {
                res.extend(self.game.board().render(self.options.glyphs));
                res.push(self.turn_line());
            }
            Command::Turn => {
                res.push(self.turn_line());
            }
            Command::Moves { square } => match parse_square(&square) {
                Ok(sq) => res.push(moves_line(sq, self.game.legal_moves(sq))),
                Err(e) => res.push(e),
            },
            Command::Move { from, to } => match (parse_square(&from), parse_square(&to)) {
                (Ok(from), Ok(to)) => {
                    self.selection = SelectionState::Idle;
                    self.play(from, to, &mut res);
                }
                (Err(e), _) | (_, Err(e)) => res.push(e),
            },
            Command::Click { square } => match parse_square(&square) {
                Ok(sq) => self.click(sq, &mut res),
                Err(e) => res.push(e),
            },
            Command::SetOption { name, value } => {
                match self.options.set_option(&name, value.as_deref()) {
                    Ok(()) => res.push(format!(
                        "info string setoption {} = {}",
                        name,
                        value.unwrap_or_default()
                    )),
                    Err(e) => res.push(format!("info string error: {}", e)),
                }
            }
            Command::Options => {
                res.extend(SessionOptions::describe());
            }
            Command::IsReady => {
                res.push("readyok".to_string());
            }
            Command::Quit => {
                self.running = false;
            }
            Command::Unknown(s) => {
                res.push(format!("info string unknown command: {}", s));
            }
        }
        res
    }

    fn reset(&mut self, game: Game) {
        self.game = game;
        self.selection = SelectionState::Idle;
    }

    fn turn_line(&self) -> String {
        match self.game.winner() {
            Some(side) => format!("winner {}", side),
            None => format!("turn {}", self.game.side_to_move()),
        }
    }

    fn play(&mut self, from: Square, to: Square, res: &mut Vec<String>) {
        let mover = self.game.board().get(from);
        let captured = self.game.board().get(to);

        match self.game.apply_move(from, to) {
            Ok(outcome) => {
                res.push(format!("ok {}{}", from, to));
                if self.options.debug {
                    if let Some(p) = mover {
                        res.push(format!(
                            "info string {} {} {} -> {}",
                            p.color,
                            p.kind.name(),
                            from,
                            to
                        ));
                    }
                    if let Some(c) = captured {
                        res.push(format!("info string captured {} {}", c.color, c.kind.name()));
                    }
                    if let MoveOutcome::GameEnded(side) = outcome {
                        res.push(format!("info string king captured, {} wins", side));
                    }
                }
                if self.options.auto_show {
                    res.extend(self.game.board().render(self.options.glyphs));
                }
                res.push(self.turn_line());
            }
            Err(e) => res.push(format!("error {}", e)),
        }
    }

    /// Square click: select a piece, complete a move, switch selection or clear it.
    fn click(&mut self, sq: Square, res: &mut Vec<String>) {
        if self.game.is_over() {
            res.push("info string game over, start a new game".to_string());
            return;
        }

        let owns_piece =
            matches!(self.game.board().get(sq), Some(p) if p.color == self.game.side_to_move());

        match self.selection.clone() {
            SelectionState::Selected { from, targets } if targets.contains(sq) => {
                self.selection = SelectionState::Idle;
                self.play(from, sq, res);
            }
            _ if owns_piece => self.select(sq, res),
            SelectionState::Selected { .. } => {
                self.selection = SelectionState::Idle;
                res.push("info string selection cleared".to_string());
            }
            SelectionState::Idle => {}
        }
    }

    fn select(&mut self, sq: Square, res: &mut Vec<String>) {
        let Some(piece) = self.game.board().get(sq) else {
            return;
        };
        let targets = self.game.legal_moves(sq);
        self.selection = SelectionState::Selected { from: sq, targets };
        res.push(format!("selected {} {} {}", piece.color, piece.kind.name(), sq));
        res.push(moves_line(sq, targets));
    }
}

fn parse_square(s: &str) -> Result<Square, String> {
    s.parse::<Square>()
        .map_err(|_| format!("error bad square: {}", s))
}

fn moves_line(from: Square, targets: SquareSet) -> String {
    if targets.is_empty() {
        format!("moves {}:", from)
    } else {
        format!("moves {}: {}", from, targets)
    }
}

/// Drive `session` from `reader` until EOF or `quit`, writing every response line.
pub fn run_with<R: BufRead, W: Write>(
    session: &mut Session,
    mut reader: R,
    mut writer: W,
) -> io::Result<()> {
    let mut buf = String::new();

    while session.is_running() {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            // EOF reached
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }

        for r in process_line(line, session) {
            writeln!(writer, "{}", r)?;
        }
        writer.flush()?;
    }

    Ok(())
}

pub fn run_session_loop(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(session, stdin.lock(), stdout.lock())
}

pub fn process_line(line: &str, session: &mut Session) -> Vec<String> {
    let cmd = parse_command(line);
    session.handle_command(cmd)
}
