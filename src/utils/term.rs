//! Terminal detection
//!
//! Resolves whether an output stream can do in-place line redraw. The
//! progress reporter takes the answer as a plain boolean, so everything
//! above this module stays testable without a real terminal.

use std::io::{self, IsTerminal};

/// Whether stdout is connected to an interactive terminal
pub fn stdout_is_interactive() -> bool {
    io::stdout().is_terminal()
}

/// Whether stderr is connected to an interactive terminal
pub fn stderr_is_interactive() -> bool {
    io::stderr().is_terminal()
}
