// ============================================================================
// report.rs — Operator-facing console output
// ============================================================================
//
// Three levels, like the build output of the CLI:
//   quiet   — failures and warnings only
//   normal  — section headers and a progress bar for long batches
//   verbose — one line per unit of work, no progress bar
// Failures and warnings are always shown, on stderr.
// ============================================================================

use std::cell::RefCell;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub struct Reporter {
    quiet: bool,
    verbose: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl Reporter {
    /// If both verbose and quiet are set, quiet takes precedence.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose: verbose && !quiet,
            bar: RefCell::new(None),
        }
    }

    /// Only failures and warnings get through.
    pub fn silent() -> Self {
        Self::new(true, false)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn emit(&self, line: String) {
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    fn emit_err(&self, line: String) {
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    pub fn banner(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!("{}", title.cyan().bold());
        println!("{}", "=".repeat(50).cyan());
    }

    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        self.emit(format!("\n=== {} ===", title).blue().bold().to_string());
    }

    pub fn success(&self, message: &str) {
        if self.verbose {
            self.emit(format!("{} {}", "✓".green(), message));
        }
    }

    /// Like `success`, but shown at normal verbosity too.
    pub fn done(&self, message: &str) {
        if !self.quiet {
            self.emit(format!("{} {}", "✓".green().bold(), message));
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(format!("{} {}", "[INFO]".cyan(), message));
        }
    }

    pub fn detail(&self, message: &str) {
        if self.verbose {
            self.emit(format!("  {}", message.dimmed()));
        }
    }

    pub fn warn(&self, message: &str) {
        self.emit_err(format!("{} {}", "[WARN]".yellow().bold(), message));
    }

    pub fn failure(&self, message: &str) {
        self.emit_err(format!("{} {}", "✗".red().bold(), message.red()));
    }

    /// Starts a progress bar for `len` steps. No-op when quiet or verbose.
    pub fn start_progress(&self, len: u64, message: &str) {
        if self.quiet || self.verbose {
            return;
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(message.to_string());
        *self.bar.borrow_mut() = Some(bar);
    }

    pub fn tick(&self, message: &str) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.set_message(message.to_string());
            bar.inc(1);
        }
    }

    pub fn finish_progress(&self, message: &str) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_with_message(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        let reporter = Reporter::new(true, true);
        assert!(reporter.is_quiet());
        assert!(!reporter.is_verbose());
    }

    #[test]
    fn test_no_progress_bar_when_verbose() {
        let reporter = Reporter::new(false, true);
        reporter.start_progress(3, "icons");
        assert!(reporter.bar.borrow().is_none());
        reporter.tick("one");
        reporter.finish_progress("done");
    }

    #[test]
    fn test_progress_bar_lifecycle() {
        let reporter = Reporter::new(false, false);
        reporter.start_progress(2, "icons");
        reporter.tick("a");
        reporter.tick("b");
        reporter.finish_progress("done");
        assert!(reporter.bar.borrow().is_none());
    }
}
