//! # guide2pdf
//!
//! View or convert a static HTML study guide (with MathJax formulas) to PDF
//! by orchestrating tools that already exist on the machine.
//!
//! Nothing here renders HTML or typesets mathematics. The crate finds an
//! external renderer, runs it, and falls back to the browser (print to PDF by
//! hand) or to a LaTeX skeleton when no renderer is installed.
//!
//! ## Flow
//!
//! ```text
//! math_study_guide.html
//!  │
//!  ├─ 1. Check   the guide exists, otherwise stop
//!  ├─ 2. Probe   wkhtmltopdf --version / python3 -c "import weasyprint"
//!  ├─ 3. Menu    detected renderers + browser + LaTeX template
//!  └─ 4. Act     spawn the renderer, open the browser, or write the template
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guide2pdf::{execute, probe_renderers, ConverterConfig, Method};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConverterConfig::default();
//!     let availability = probe_renderers(&config).await?;
//!     let method = if availability.any_available() {
//!         Method::from(availability.available_renderers()[0])
//!     } else {
//!         Method::Browser
//!     };
//!     let outcome = execute(method, &config).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `guide2pdf` and `open-guide` binaries (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod browser;
pub mod config;
pub mod convert;
pub mod error;
pub mod guidance;
pub mod menu;
pub mod opener;
pub mod probe;
pub mod progress;
pub mod session;
pub mod template;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use browser::{file_url, open_in_browser, open_url};
pub use config::{ConverterConfig, ConverterConfigBuilder};
pub use convert::{
    convert_with_weasyprint, convert_with_wkhtmltopdf, execute, wkhtmltopdf_args, ActionOutcome,
    ConversionReport,
};
pub use error::{ChoiceError, GuideError};
pub use menu::{Menu, Method};
pub use opener::{open_guide, OpenOutcome};
pub use probe::{probe_renderers, Availability, ToolStatus};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use renderer_probe::Renderer;
pub use session::{ConverterSession, SessionOutcome};
pub use template::{write_template, LATEX_TEMPLATE};
