//! Error types for the guide2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`GuideError`] — an action could not be carried out (input file missing,
//!   renderer exited non-zero, browser could not be launched). Every action
//!   returns it; the interactive session prints it and moves on.
//!
//! * [`ChoiceError`] — the user typed something the menu cannot accept. No
//!   external program is ever invoked for these.

use std::path::PathBuf;
use std::process::ExitStatus;

use renderer_probe::Renderer;
use thiserror::Error;

/// Failures of a single guide2pdf action.
#[derive(Debug, Error)]
pub enum GuideError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The HTML study guide was not found.
    #[error("{} not found!", .path.display())]
    InputNotFound { path: PathBuf },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// The renderer program does not exist on this system.
    #[error("{renderer} not found: '{}' is not installed or not on PATH", .program.display())]
    RendererNotFound { renderer: Renderer, program: PathBuf },

    /// The renderer program exists but could not be started.
    #[error("Failed to start {renderer} ('{}'): {source}", .program.display())]
    RendererSpawn {
        renderer: Renderer,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran and exited unsuccessfully. `stderr` is its raw output.
    #[error("{stderr}")]
    RendererFailed {
        renderer: Renderer,
        status: ExitStatus,
        stderr: String,
    },

    // ── Browser errors ────────────────────────────────────────────────────
    /// The default URL handler (or `$BROWSER`) could not open the file.
    #[error("could not open '{url}' with '{command}': {reason}")]
    BrowserOpenFailed {
        url: String,
        command: String,
        reason: String,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the LaTeX template.
    #[error("Failed to write template '{}': {source}", .path.display())]
    TemplateWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the user's answer or writing a message failed.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejected menu input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    /// The answer was not an integer.
    #[error("Invalid input! Please enter a number.")]
    NotANumber { input: String },

    /// The integer does not name a menu entry.
    #[error("Invalid choice!")]
    OutOfRange { choice: i64, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_display() {
        let e = GuideError::InputNotFound {
            path: PathBuf::from("math_study_guide.html"),
        };
        assert_eq!(e.to_string(), "math_study_guide.html not found!");
    }

    #[test]
    fn renderer_not_found_names_program() {
        let e = GuideError::RendererNotFound {
            renderer: Renderer::Wkhtmltopdf,
            program: PathBuf::from("/opt/wk/bin/wkhtmltopdf"),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("wkhtmltopdf not found"), "got: {msg}");
        assert!(msg.contains("/opt/wk/bin/wkhtmltopdf"));
    }

    #[test]
    fn choice_error_messages() {
        let e = ChoiceError::NotANumber { input: "abc".into() };
        assert_eq!(e.to_string(), "Invalid input! Please enter a number.");

        let e = ChoiceError::OutOfRange { choice: 7, max: 3 };
        assert_eq!(e.to_string(), "Invalid choice!");
    }

    #[test]
    fn terminal_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let e: GuideError = io.into();
        assert!(e.to_string().contains("pipe closed"));
    }
}
