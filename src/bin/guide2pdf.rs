//! CLI binary for converting the study guide.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConverterConfig` and drives a `ConverterSession` on the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use guide2pdf::{
    probe_renderers, ConversionProgressCallback, ConversionReport, ConverterConfig,
    ConverterSession, Method, ProgressCallback, Renderer, SessionOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner on stderr while a renderer runs. wkhtmltopdf sits silent for the
/// whole JavaScript delay, so without it the terminal looks hung.
struct CliProgressCallback {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bar: Mutex::new(None),
        })
    }

    fn finish(&self) {
        if let Some(bar) = self.bar.lock().ok().and_then(|mut b| b.take()) {
            bar.finish_and_clear();
        }
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, renderer: Renderer, input: &Path, _output: &Path) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix(renderer.display_name());
        bar.set_message(format!("rendering {}…", input.display()));
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_conversion_complete(&self, _report: &ConversionReport) {
        self.finish();
    }

    fn on_conversion_error(&self, _renderer: Renderer, _error: &str) {
        self.finish();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive: probe renderers and pick from the menu
  guide2pdf

  # Only report which renderers are installed
  guide2pdf --check
  guide2pdf --check --json

  # Non-interactive conversion
  guide2pdf --method wkhtmltopdf -o guide.pdf

  # Emit the LaTeX template
  guide2pdf --method latex --template-file notes.tex

RENDERERS:
  wkhtmltopdf   runs MathJax (JavaScript delay, default 5000 ms)   recommended
  WeasyPrint    no JavaScript: formulas stay as TeX source

ENVIRONMENT VARIABLES:
  GUIDE2PDF_HTML          HTML file to convert
  GUIDE2PDF_OUTPUT        PDF to write
  WKHTMLTOPDF_PATH        wkhtmltopdf program to use
  GUIDE2PDF_PYTHON        Python interpreter that can import weasyprint
  BROWSER                 Browser command (%s is replaced by the URL)
"#;

/// Convert an HTML study guide to PDF with whatever renderer is installed.
#[derive(Parser, Debug)]
#[command(
    name = "guide2pdf",
    version,
    about = "Convert an HTML study guide to PDF using wkhtmltopdf, WeasyPrint, or the browser",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// HTML study guide to convert.
    #[arg(long, env = "GUIDE2PDF_HTML", default_value = guide2pdf::config::DEFAULT_HTML_FILE)]
    html: PathBuf,

    /// PDF file written by the renderers.
    #[arg(short, long, env = "GUIDE2PDF_OUTPUT", default_value = guide2pdf::config::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// LaTeX template destination.
    #[arg(long, env = "GUIDE2PDF_TEMPLATE", default_value = guide2pdf::config::DEFAULT_TEMPLATE_FILE)]
    template_file: PathBuf,

    /// Run one method without the menu.
    #[arg(long, value_enum)]
    method: Option<MethodArg>,

    /// Report renderer availability and exit.
    #[arg(long)]
    check: bool,

    /// With --check: print the report as JSON.
    #[arg(long, requires = "check")]
    json: bool,

    /// wkhtmltopdf program.
    #[arg(long, env = "WKHTMLTOPDF_PATH")]
    wkhtmltopdf: Option<PathBuf>,

    /// Python interpreter used for WeasyPrint.
    #[arg(long, env = "GUIDE2PDF_PYTHON")]
    python: Option<PathBuf>,

    /// Browser command instead of the system default handler.
    #[arg(long, env = "BROWSER")]
    browser: Option<String>,

    /// Milliseconds wkhtmltopdf waits for MathJax.
    #[arg(long, env = "GUIDE2PDF_JS_DELAY", default_value_t = 5000)]
    javascript_delay: u64,

    /// Disable the renderer spinner.
    #[arg(long, env = "GUIDE2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "GUIDE2PDF_VERBOSE")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, env = "GUIDE2PDF_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    Wkhtmltopdf,
    Weasyprint,
    Browser,
    Latex,
}

impl From<MethodArg> for Method {
    fn from(v: MethodArg) -> Self {
        match v {
            MethodArg::Wkhtmltopdf => Method::Wkhtmltopdf,
            MethodArg::Weasyprint => Method::WeasyPrint,
            MethodArg::Browser => Method::Browser,
            MethodArg::Latex => Method::LatexTemplate,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The transcript on stdout is the user interface; logs stay on stderr
    // and are quiet unless asked for.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let show_progress = !cli.quiet && !cli.no_progress;
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Check-only mode ──────────────────────────────────────────────────
    if cli.check {
        let availability = probe_renderers(&config)
            .await
            .context("Failed to probe renderers")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&availability)
                    .context("Failed to serialize availability")?
            );
        } else {
            for tool in &availability.tools {
                let line = tool.status_line();
                let line = if tool.available { green(&line) } else { red(&line) };
                match (&tool.version, &tool.detail) {
                    (Some(v), _) => println!("{line}  {}", dim(&format!("version {v}"))),
                    (None, Some(d)) => println!("{line}  {}", dim(d)),
                    (None, None) => println!("{line}"),
                }
            }
        }
        return Ok(if availability.any_available() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // ── Session ──────────────────────────────────────────────────────────
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = ConverterSession::new(&config, stdin, io::stdout());

    let outcome = tokio::select! {
        r = async {
            match cli.method {
                Some(m) => session.run_method(m.into()).await,
                None => session.run().await,
            }
        } => r.context("Session failed")?,
        _ = tokio::signal::ctrl_c() => {
            println!("\nOperation cancelled.");
            io::stdout().flush().ok();
            // A pending stdin read would keep the runtime from shutting down.
            std::process::exit(0);
        }
    };

    // Interactive runs always exit 0 once the outcome was reported; scripted
    // runs (--method) report failure through the exit status.
    let failed = matches!(
        outcome,
        SessionOutcome::ActionFailed(_) | SessionOutcome::MissingInput
    );
    Ok(if cli.method.is_some() && failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Map CLI args to `ConverterConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConverterConfig> {
    let mut builder = ConverterConfig::builder()
        .html_file(&cli.html)
        .output_file(&cli.output)
        .template_file(&cli.template_file)
        .javascript_delay_ms(cli.javascript_delay);

    if let Some(ref p) = cli.wkhtmltopdf {
        builder = builder.wkhtmltopdf_program(p);
    }
    if let Some(ref p) = cli.python {
        builder = builder.python_program(p);
    }
    if let Some(ref b) = cli.browser {
        builder = builder.browser_command(b);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
