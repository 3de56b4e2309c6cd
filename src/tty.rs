//! Terminal detection for the CLI.

use std::io::{self, IsTerminal};

pub fn is_stdout_tty() -> bool {
    io::stdout().is_terminal()
}
