pub mod options;
pub mod parser;
pub mod session;

pub use options::SessionOptions;
pub use parser::{parse_command, Command};
pub use session::{process_line, run_session_loop, run_with, SelectionState, Session};
