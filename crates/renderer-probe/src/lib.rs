//! # renderer-probe
//!
//! Detect which external HTML-to-PDF renderers are installed by actually
//! invoking them, the same way a user would from a shell.
//!
//! ## How it works
//!
//! For every [`Renderer`]:
//!
//! 1. Spawns the probe command (`wkhtmltopdf --version`, or
//!    `python3 -c "import weasyprint; ..."`).
//! 2. A spawn failure with `NotFound` means the program is not installed.
//! 3. A non-zero exit means the program exists but the renderer is unusable
//!    (e.g. Python is present but `weasyprint` cannot be imported).
//! 4. Exit code 0 means available; the first dotted version number found on
//!    stdout/stderr is reported alongside.
//!
//! Probing is synchronous. Async callers should run it on a blocking pool.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use renderer_probe::{probe, Renderer};
//!
//! let program = Renderer::Wkhtmltopdf.default_program();
//! match probe(Renderer::Wkhtmltopdf, program.as_ref()) {
//!     Ok(info) => println!("found {} {:?}", info.renderer, info.version),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Python snippet used to detect WeasyPrint. Printing the version doubles as
/// proof that the import succeeded.
pub const WEASYPRINT_PROBE_SCRIPT: &str = "import weasyprint; print(weasyprint.__version__)";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by [`probe`].
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The program could not be found on `PATH` (or at the given path).
    #[error("{renderer} not found ('{}' is not installed or not on PATH)", .program.display())]
    NotFound { renderer: Renderer, program: PathBuf },

    /// The program exists but could not be started.
    #[error("Failed to start '{}': {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The probe ran but exited unsuccessfully.
    #[error("{renderer} probe exited with {status}: {stderr}")]
    Failed {
        renderer: Renderer,
        status: ExitStatus,
        stderr: String,
    },
}

impl ProbeError {
    /// Whether the renderer is absent, as opposed to present but broken.
    ///
    /// For WeasyPrint the interpreter always exists when the probe ran, so a
    /// failed `import weasyprint` also counts as absent.
    pub fn is_missing(&self) -> bool {
        match self {
            ProbeError::NotFound { .. } => true,
            ProbeError::Spawn { .. } => false,
            ProbeError::Failed {
                renderer, stderr, ..
            } => {
                *renderer == Renderer::WeasyPrint
                    && (stderr.contains("No module named") || stderr.contains("ModuleNotFoundError"))
            }
        }
    }
}

// ── Renderer catalogue ───────────────────────────────────────────────────────

/// An external HTML-to-PDF renderer this crate knows how to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// The `wkhtmltopdf` command-line tool. Runs page JavaScript, so MathJax
    /// formulas render.
    Wkhtmltopdf,
    /// The WeasyPrint Python library. No JavaScript support.
    WeasyPrint,
}

impl Renderer {
    /// All renderers, in preference order.
    pub const ALL: [Renderer; 2] = [Renderer::Wkhtmltopdf, Renderer::WeasyPrint];

    /// Human-readable name used in messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Renderer::Wkhtmltopdf => "wkhtmltopdf",
            Renderer::WeasyPrint => "WeasyPrint",
        }
    }

    /// The program spawned to probe (and later drive) this renderer when the
    /// caller does not override it.
    pub fn default_program(self) -> PathBuf {
        match self {
            Renderer::Wkhtmltopdf => PathBuf::from("wkhtmltopdf"),
            Renderer::WeasyPrint => PathBuf::from("python3"),
        }
    }

    /// Arguments passed to the program when probing.
    pub fn probe_args(self) -> Vec<OsString> {
        match self {
            Renderer::Wkhtmltopdf => vec!["--version".into()],
            Renderer::WeasyPrint => vec!["-c".into(), WEASYPRINT_PROBE_SCRIPT.into()],
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A successfully probed renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererInfo {
    pub renderer: Renderer,
    /// The program that answered the probe.
    pub program: PathBuf,
    /// Version reported by the renderer, if one could be parsed.
    pub version: Option<String>,
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Probe `renderer` by running `program` with [`Renderer::probe_args`].
///
/// Blocks until the probe process exits.
pub fn probe(renderer: Renderer, program: &Path) -> Result<RendererInfo, ProbeError> {
    let output = Command::new(program)
        .args(renderer.probe_args())
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProbeError::NotFound {
                    renderer,
                    program: program.to_path_buf(),
                }
            } else {
                ProbeError::Spawn {
                    program: program.to_path_buf(),
                    source: e,
                }
            }
        })?;

    if !output.status.success() {
        return Err(ProbeError::Failed {
            renderer,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // wkhtmltopdf prints its banner on stdout; some builds use stderr.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = parse_version(&stdout)
        .or_else(|| parse_version(&String::from_utf8_lossy(&output.stderr)));

    Ok(RendererInfo {
        renderer,
        program: program.to_path_buf(),
        version,
    })
}

/// Extract the first dotted version number (`0.12.6`, `62.3`) from text.
pub fn parse_version(text: &str) -> Option<String> {
    static VERSION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\b(\d+\.\d+(?:\.\d+)*)\b").expect("static regex"));

    VERSION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wkhtmltopdf_banner() {
        assert_eq!(
            parse_version("wkhtmltopdf 0.12.6 (with patched qt)\n").as_deref(),
            Some("0.12.6")
        );
    }

    #[test]
    fn parses_two_component_version() {
        assert_eq!(parse_version("62.3\n").as_deref(), Some("62.3"));
    }

    #[test]
    fn no_version_in_text() {
        assert_eq!(parse_version("no digits here"), None);
        assert_eq!(parse_version("build 7"), None);
    }

    #[test]
    fn probe_args_are_fixed() {
        assert_eq!(Renderer::Wkhtmltopdf.probe_args(), vec![OsString::from("--version")]);
        let weasy = Renderer::WeasyPrint.probe_args();
        assert_eq!(weasy[0], OsString::from("-c"));
        assert!(weasy[1].to_string_lossy().contains("import weasyprint"));
    }

    #[test]
    fn missing_program_is_not_found() {
        let program = PathBuf::from("/nonexistent/definitely-not-a-renderer");
        let err = probe(Renderer::Wkhtmltopdf, &program).unwrap_err();
        assert!(matches!(err, ProbeError::NotFound { .. }), "got: {err:?}");
        assert!(err.to_string().contains("wkhtmltopdf not found"));
        assert!(err.is_missing());
    }

    #[cfg(unix)]
    #[test]
    fn failed_probe_is_missing_only_for_absent_module() {
        use std::os::unix::process::ExitStatusExt;
        let failed = |renderer, stderr: &str| ProbeError::Failed {
            renderer,
            status: ExitStatus::from_raw(1 << 8),
            stderr: stderr.to_string(),
        };
        assert!(failed(
            Renderer::WeasyPrint,
            "ModuleNotFoundError: No module named 'weasyprint'"
        )
        .is_missing());
        assert!(!failed(Renderer::WeasyPrint, "OSError: cannot load library 'pango-1.0-0'")
            .is_missing());
        assert!(!failed(Renderer::Wkhtmltopdf, "cannot connect to X server").is_missing());
    }

    #[test]
    fn renderer_serialises_lowercase() {
        assert_eq!(
            serde_json::to_string(&Renderer::WeasyPrint).unwrap(),
            "\"weasyprint\""
        );
        let r: Renderer = serde_json::from_str("\"wkhtmltopdf\"").unwrap();
        assert_eq!(r, Renderer::Wkhtmltopdf);
    }
}
