//! Renderer invocations and the action dispatcher.
//!
//! Each renderer is an opaque external program: we build its argument list,
//! spawn it, block until it exits and report either the produced PDF or the
//! raw stderr. [`execute`] maps a menu [`Method`] onto the matching action.

use crate::browser;
use crate::config::ConverterConfig;
use crate::error::GuideError;
use crate::menu::Method;
use crate::template;
use renderer_probe::Renderer;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Python program run by the WeasyPrint path. Input and output paths arrive
/// as `sys.argv[1]` and `sys.argv[2]` so no quoting is needed.
pub const WEASYPRINT_RENDER_SCRIPT: &str =
    "import sys, weasyprint; weasyprint.HTML(filename=sys.argv[1]).write_pdf(sys.argv[2])";

/// A successful renderer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub renderer: Renderer,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Size of the produced PDF (0 if the renderer left no file behind).
    pub bytes: u64,
    pub duration_ms: u64,
}

/// What a completed action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    Converted(ConversionReport),
    BrowserOpened { url: String },
    TemplateWritten { path: PathBuf },
}

/// Run the action behind `method`.
///
/// Does not check renderer availability; callers offer only detected
/// renderers, and a missing program surfaces as
/// [`GuideError::RendererNotFound`] anyway.
pub async fn execute(method: Method, config: &ConverterConfig) -> Result<ActionOutcome, GuideError> {
    debug!("Executing {:?}", method);
    match method {
        Method::Wkhtmltopdf => convert_with_wkhtmltopdf(config)
            .await
            .map(ActionOutcome::Converted),
        Method::WeasyPrint => convert_with_weasyprint(config)
            .await
            .map(ActionOutcome::Converted),
        Method::Browser => browser::open_in_browser(&config.html_file, config)
            .await
            .map(|url| ActionOutcome::BrowserOpened { url }),
        Method::LatexTemplate => template::write_template(&config.template_file)
            .await
            .map(|path| ActionOutcome::TemplateWritten { path }),
    }
}

/// The full wkhtmltopdf argument list: layout flags, JavaScript settings,
/// then input and output.
pub fn wkhtmltopdf_args(config: &ConverterConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(18);
    args.push("--page-size".into());
    args.push(config.page_size.clone().into());
    for side in ["top", "right", "bottom", "left"] {
        args.push(format!("--margin-{side}").into());
        args.push(config.margin.clone().into());
    }
    args.push("--encoding".into());
    args.push(config.encoding.clone().into());
    args.push("--enable-javascript".into());
    args.push("--javascript-delay".into());
    args.push(config.javascript_delay_ms.to_string().into());
    args.push("--no-stop-slow-scripts".into());
    args.push(config.html_file.clone().into_os_string());
    args.push(config.output_file.clone().into_os_string());
    args
}

/// The interpreter arguments for the WeasyPrint path.
pub fn weasyprint_args(config: &ConverterConfig) -> Vec<OsString> {
    vec![
        "-c".into(),
        WEASYPRINT_RENDER_SCRIPT.into(),
        config.html_file.clone().into_os_string(),
        config.output_file.clone().into_os_string(),
    ]
}

/// Convert with wkhtmltopdf. Blocks at least `javascript_delay_ms`.
pub async fn convert_with_wkhtmltopdf(
    config: &ConverterConfig,
) -> Result<ConversionReport, GuideError> {
    run_renderer(Renderer::Wkhtmltopdf, wkhtmltopdf_args(config), config).await
}

/// Convert with WeasyPrint. MathJax will not run, so formulas stay as TeX.
pub async fn convert_with_weasyprint(
    config: &ConverterConfig,
) -> Result<ConversionReport, GuideError> {
    run_renderer(Renderer::WeasyPrint, weasyprint_args(config), config).await
}

async fn run_renderer(
    renderer: Renderer,
    args: Vec<OsString>,
    config: &ConverterConfig,
) -> Result<ConversionReport, GuideError> {
    let input = config.html_file.clone();
    let output_path = config.output_file.clone();

    if !input.exists() {
        return Err(GuideError::InputNotFound { path: input });
    }
    if output_path == input {
        return Err(GuideError::InvalidConfig(format!(
            "output file would overwrite the input '{}'",
            input.display()
        )));
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| GuideError::Internal(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let program = config.program_for(renderer).to_path_buf();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(renderer, &input, &output_path);
    }

    info!("Converting {} with {}", input.display(), renderer);
    debug!("{} {:?}", program.display(), args);

    let start = Instant::now();
    let result = tokio::process::Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .await;

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            let err = spawn_error(renderer, program, e);
            report_error(config, renderer, &err);
            return Err(err);
        }
    };

    if !output.status.success() {
        let err = GuideError::RendererFailed {
            renderer,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        };
        report_error(config, renderer, &err);
        return Err(err);
    }

    let report = ConversionReport {
        renderer,
        bytes: file_len(&output_path).await,
        input,
        output: output_path,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "{} wrote {} ({} bytes) in {}ms",
        renderer,
        report.output.display(),
        report.bytes,
        report.duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(&report);
    }
    Ok(report)
}

fn spawn_error(renderer: Renderer, program: PathBuf, e: std::io::Error) -> GuideError {
    if e.kind() == std::io::ErrorKind::NotFound {
        GuideError::RendererNotFound { renderer, program }
    } else {
        GuideError::RendererSpawn {
            renderer,
            program,
            source: e,
        }
    }
}

fn report_error(config: &ConverterConfig, renderer: Renderer, err: &GuideError) {
    warn!("{} failed: {}", renderer, err);
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_error(renderer, &err.to_string());
    }
}

async fn file_len(path: &Path) -> u64 {
    tokio::fs::metadata(path).await.map(|m| m.len()).unwrap_or(0)
}
