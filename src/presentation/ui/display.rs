use colored::Colorize;
use std::path::Path;

/// Console output helpers for user-facing status lines
#[derive(Debug, Clone, Copy)]
pub struct DisplayHelper {
    pub use_color: bool,
}

impl DisplayHelper {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{}", self.success_line(message));
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    /// Print a warning message to stderr
    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.warning_line(message));
    }

    /// Print a plain status line
    pub fn info(&self, message: &str) {
        println!("{}", message);
    }

    /// Closing line, printed on every run
    pub fn finish(&self) {
        if self.use_color {
            println!("{}", "Finito...".bold());
        } else {
            println!("Finito...");
        }
    }

    pub fn success_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "✓".green().bold(), message)
        } else {
            message.to_string()
        }
    }

    pub fn error_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "Error:".red().bold(), message)
        } else {
            format!("Error: {}", message)
        }
    }

    pub fn warning_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "⚠".yellow().bold(), message)
        } else {
            format!("Warning: {}", message)
        }
    }

    /// Format a file path with appropriate styling
    pub fn format_path(&self, path: &Path) -> String {
        let path = path.display().to_string();
        if self.use_color {
            path.cyan().to_string()
        } else {
            path
        }
    }
}
