//! ANSI escape stripping for terminal output read back by a tool call.

use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"\x1b(\[[0-9;?]*[a-zA-Z]|\][^\x07]*\x07|[()][A-Za-z])").expect("static ANSI pattern")
    })
}

/// Strip CSI/OSC escape sequences, leaving the plain text a reader would
/// see rendered in a terminal.
pub fn strip_ansi(raw: &str) -> String {
    pattern().replace_all(raw, "").into_owned()
}

#[cfg(test)]
#[path = "ansi_tests.rs"]
mod tests;
