//! Line-oriented console reporter.

use crossterm::style::Stylize;

use snyk_get_core::Reporter;

/// Console implementation of the engine's [`Reporter`].
///
/// Prints one line per event; per-chunk progress updates are swallowed so
/// the output stays readable in CI logs.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter. `quiet` drops informational lines, keeping
    /// warnings and errors.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn downloading(&self, name: &str, current: u64, total: Option<u64>) {
        if self.quiet || current != 0 {
            return;
        }
        match total {
            Some(total) => println!("  Downloading {name} ({total} bytes)"),
            None => println!("  Downloading {name}"),
        }
    }

    fn verifying(&self, name: &str) {
        if !self.quiet {
            println!("  Verifying {name}");
        }
    }

    fn installing(&self, name: &str) {
        if !self.quiet {
            println!("  Installing {name}");
        }
    }

    fn done(&self, name: &str, detail: &str) {
        println!("{} {name} {detail}", "✓".green());
    }

    fn failed(&self, name: &str, reason: &str) {
        eprintln!("{} {name}: {reason}", "✗".red());
    }

    fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    fn success(&self, msg: &str) {
        println!("{} {msg}", "✓".green());
    }

    fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", "!".yellow());
    }

    fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "✗".red());
    }
}
