//! Styled terminal output
//!
//! Glyph-prefixed status lines plus the plain report lines printed by the
//! commands. Errors always go to stderr; everything else respects `--quiet`.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Errors are always shown, even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print only with -v
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Section title preceded by a blank line
    pub fn header(&self, title: &str) {
        println!("\n{}", style(title).bold());
    }

    /// One `label = value` result line
    pub fn result_line(&self, label: &str, value: impl std::fmt::Display) {
        println!("{} = {}", label, style(value).bold());
    }

    pub fn blank_line(&self) {
        println!();
    }
}
