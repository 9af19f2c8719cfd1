//! Terminal output for the cutout CLI.
//!
//! Status lines follow Cargo's layout: a right-aligned verb, then the
//! message. They go to stderr; stdout is reserved for generated output such
//! as shell completions.

use std::io::{IsTerminal, Write};
use std::path::Path;

/// Column the verb is right-aligned to.
const VERB_COLUMN: usize = 12;

/// Colour family of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Status,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Status => "\x1b[1;32m",
            Tone::Info => "\x1b[1;36m",
            Tone::Warning => "\x1b[1;33m",
            Tone::Error => "\x1b[1;31m",
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_PATH: &str = "\x1b[36m";

/// Writes status lines, coloured when stderr is a terminal.
pub struct Printer {
    ansi: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            ansi: std::io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { ansi: false }
    }

    /// Progress and results, e.g. "    Exported dist/cutout-edited.png".
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Status, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Info, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Warning, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Error, verb, message);
    }

    /// Highlight a path inside a message.
    pub fn cyan(&self, text: &str) -> String {
        if self.ansi {
            format!("{ANSI_PATH}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.render(tone, verb, message);
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn render(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_COLUMN$}");
        if self.ansi {
            format!("{}{verb}{ANSI_RESET} {message}", tone.ansi())
        } else {
            format!("{verb} {message}")
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(1, "stroke", "strokes")` is "1 stroke", any other count takes the
/// plural form.
pub fn plural(n: usize, one: &str, many: &str) -> String {
    let noun = if n == 1 { one } else { many };
    format!("{n} {noun}")
}

/// Show `path` relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_owned(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
