//! Quick launcher: open the study guide in the default browser.

use anyhow::{Context, Result};
use clap::Parser;
use guide2pdf::{open_guide, ConverterConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Open the HTML study guide in the default web browser.
#[derive(Parser, Debug)]
#[command(
    name = "open-guide",
    version,
    about = "Open the HTML study guide in the default web browser",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// HTML study guide to open.
    #[arg(long, env = "GUIDE2PDF_HTML", default_value = guide2pdf::config::DEFAULT_HTML_FILE)]
    html: PathBuf,

    /// Browser command instead of the system default handler.
    #[arg(long, env = "BROWSER")]
    browser: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "GUIDE2PDF_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut builder = ConverterConfig::builder().html_file(&cli.html);
    if let Some(ref b) = cli.browser {
        builder = builder.browser_command(b);
    }
    let config = builder.build().context("Invalid configuration")?;

    let mut stdout = io::stdout();
    let outcome = tokio::select! {
        r = open_guide(&config, &mut stdout) => r.context("Failed to open the study guide")?,
        _ = tokio::signal::ctrl_c() => {
            println!("\nOperation cancelled.");
            return Ok(ExitCode::FAILURE);
        }
    };
    stdout.flush().ok();

    Ok(ExitCode::from(outcome.exit_code()))
}
