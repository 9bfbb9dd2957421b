// textsift/src/ui/mod.rs
//! Console presentation helpers.

pub mod summary;

use is_terminal::IsTerminal;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

/// Applies a named ANSI color when `enabled` is true.
pub fn paint(text: &str, color: AnsiColors, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let colored = io::stderr().is_terminal();
    let _ = writeln!(io::stderr(), "{}", paint(msg.as_ref(), AnsiColors::Cyan, colored));
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let colored = io::stderr().is_terminal();
    let _ = writeln!(io::stderr(), "{}", paint(msg.as_ref(), AnsiColors::Yellow, colored));
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let colored = io::stderr().is_terminal();
    let _ = writeln!(io::stderr(), "{}", paint(msg.as_ref(), AnsiColors::Red, colored));
}
