//! User notifications raised by the fetch hooks

use colored::Colorize;

/// How many failure notifications a [`Fetcher`](super::Fetcher) may still raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    pub attempts: u32,
    pub cap: u32,
}

impl RetryBudget {
    pub fn new(cap: u32) -> Self {
        Self { attempts: 0, cap }
    }

    pub fn allows_notification(&self) -> bool {
        self.attempts < self.cap
    }

    pub(crate) fn spend(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    pub(crate) fn reset(&mut self) {
        self.attempts = 0;
    }
}

/// Sink for transient user-facing messages
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);

    fn success(&self, message: &str);

    /// Failure raised by a fetcher; `budget` is the state before this notification
    fn fetch_error(&self, message: &str, budget: RetryBudget) {
        let _ = budget;
        self.error(message);
    }
}

/// Writes notifications to stderr so piped output stays clean
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier {
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress success messages, e.g. for JSON output
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    fn fetch_error(&self, message: &str, budget: RetryBudget) {
        if budget.attempts + 1 >= budget.cap {
            eprintln!(
                "{} {} {}",
                "✗".red(),
                message,
                "(further failures will not be reported)".dimmed()
            );
        } else {
            self.error(message);
        }
    }
}

#[cfg(test)]
pub use recording::RecordingNotifier;
