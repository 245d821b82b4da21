//! Command parser for the text front end.
//!
//! Squares stay as strings here; the session validates them so it can answer
//! with a precise error line.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    NewGame,
    Position {
        fen: Option<String>,
    },
    Show,
    Turn,
    Moves {
        square: String,
    },
    Move {
        from: String,
        to: String,
    },
    Click {
        square: String,
    },
    SetOption {
        name: String,
        value: Option<String>,
    },
    Options,
    IsReady,
    Quit,
    Unknown(String),
}

/// Parse one input line (simple tokenizer)
pub fn parse_command(line: &str) -> Command {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Command::Unknown(String::new());
    };
    let arg = |i: usize| parts.get(i).map(|s| s.to_string()).unwrap_or_default();

    match head {
        "new" | "newgame" => Command::NewGame,
        "show" | "d" => Command::Show,
        "turn" => Command::Turn,
        "options" => Command::Options,
        "isready" => Command::IsReady,
        "quit" | "exit" => Command::Quit,
        "moves" => Command::Moves { square: arg(1) },
        "click" => Command::Click { square: arg(1) },
        "move" => {
            // move e2e4 | move e2 e4
            if parts.len() >= 3 {
                Command::Move {
                    from: arg(1),
                    to: arg(2),
                }
            } else {
                let mv = arg(1);
                match (mv.get(..2), mv.get(2..)) {
                    (Some(from), Some(to)) if !to.is_empty() => Command::Move {
                        from: from.to_string(),
                        to: to.to_string(),
                    },
                    _ => Command::Move {
                        from: mv,
                        to: String::new(),
                    },
                }
            }
        }
        "position" => {
            // position startpos | position fen <placement> <side> [...]
            match parts.get(1) {
                Some(&"fen") => Command::Position {
                    fen: Some(parts[2..].join(" ")),
                },
                Some(&"startpos") => Command::Position { fen: None },
                _ => Command::Unknown(parts.join(" ")),
            }
        }
        "setoption" => {
            // setoption name <name> [value <val>]
            let mut name = String::new();
            let mut value: Option<String> = None;
            let mut i = 1usize;
            while i < parts.len() {
                match parts[i] {
                    "name" => {
                        i += 1;
                        let mut vals = Vec::new();
                        while i < parts.len() && parts[i] != "value" {
                            vals.push(parts[i]);
                            i += 1;
                        }
                        name = vals.join(" ");
                    }
                    "value" => {
                        value = Some(parts[i + 1..].join(" "));
                        break;
                    }
                    _ => {
                        i += 1;
                    }
                }
            }
            Command::SetOption { name, value }
        }
        other => Command::Unknown(other.to_string()),
    }
}
