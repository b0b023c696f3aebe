//! Status output for the command line.
//!
//! Commands print results to stdout and report progress through [`Shell`],
//! which writes right-aligned status prefixes to stderr.

use std::fmt::Display;
use std::io::{self, IsTerminal};

use crate::util::diagnostic::{self, Diagnostic};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: error diagnostics only
    Quiet,
    #[default]
    Normal,
    /// --verbose: include notes
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// --no-color
    Never,
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Created,
    Updated,
    Removed,
    Cleared,
    Migrated,
    Info,
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Created => "Created",
            Status::Updated => "Updated",
            Status::Removed => "Removed",
            Status::Cleared => "Cleared",
            Status::Migrated => "Migrated",
            Status::Info => "Info",
            Status::Warning => "Warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Created
            | Status::Updated
            | Status::Removed
            | Status::Cleared
            | Status::Migrated => "\x1b[1;32m",
            Status::Info => "\x1b[1;36m",
            Status::Warning => "\x1b[1;33m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Central shell for command output.
#[derive(Debug, Clone)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Never => false,
        };
        Shell {
            verbosity,
            use_color,
        }
    }

    /// Shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, color)
    }

    /// Print `{status:>12} {message}` to stderr. Silent in quiet mode.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print a note, shown only in verbose mode.
    pub fn note(&self, msg: impl Display) {
        if self.verbosity == Verbosity::Verbose {
            self.status(Status::Info, msg);
        }
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print a diagnostic, honoring quiet mode for warnings.
    pub fn diagnostic(&self, diag: &Diagnostic) {
        if self.verbosity == Verbosity::Quiet
            && diag.severity == diagnostic::Severity::Warning
        {
            return;
        }
        diagnostic::emit(diag, self.use_color);
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_right_aligned() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Never);
        assert_eq!(shell.format_status(Status::Created), "     Created");
        assert_eq!(shell.format_status(Status::Warning), "     Warning");
    }

    #[test]
    fn test_colored_status_wraps_text() {
        let shell = Shell {
            verbosity: Verbosity::Normal,
            use_color: true,
        };
        let s = shell.format_status(Status::Warning);
        assert!(s.starts_with("\x1b[1;33m"));
        assert!(s.ends_with("Warning\x1b[0m"));
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let shell = Shell::from_flags(true, true, ColorChoice::Never);
        assert_eq!(shell.verbosity, Verbosity::Quiet);
        assert!(!shell.use_color);
    }
}
