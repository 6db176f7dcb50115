//! Open the guide in a web browser.
//!
//! The OS default handler for `file://` URLs is used unless a browser
//! command is configured, in which case it behaves like `$BROWSER`: `%s`
//! is replaced with the URL, otherwise the URL is appended.

use crate::config::ConverterConfig;
use crate::error::GuideError;
use std::path::Path;
use std::process::Stdio;
use tracing::{debug, info};

/// `file://` URL for `path`, made absolute against the current directory.
///
/// The path is neither canonicalised nor percent-encoded.
pub fn file_url(path: &Path) -> Result<String, GuideError> {
    let abs = std::path::absolute(path).map_err(|e| {
        GuideError::Internal(format!("Cannot resolve '{}': {}", path.display(), e))
    })?;
    Ok(format!("file://{}", abs.display()))
}

/// The program and arguments that will open `url`.
pub fn browser_invocation(url: &str, browser_command: Option<&str>) -> (String, Vec<String>) {
    if let Some(command) = browser_command {
        let mut parts = command.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            let mut args: Vec<String> = parts.collect();
            if args.iter().any(|a| a.contains("%s")) {
                for arg in args.iter_mut() {
                    *arg = arg.replace("%s", url);
                }
            } else {
                args.push(url.to_string());
            }
            return (program, args);
        }
    }
    default_invocation(url)
}

#[cfg(target_os = "macos")]
fn default_invocation(url: &str) -> (String, Vec<String>) {
    ("open".to_string(), vec![url.to_string()])
}

#[cfg(target_os = "windows")]
fn default_invocation(url: &str) -> (String, Vec<String>) {
    // The empty string is `start`'s window title.
    (
        "cmd".to_string(),
        vec!["/C".into(), "start".into(), String::new(), url.to_string()],
    )
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_invocation(url: &str) -> (String, Vec<String>) {
    ("xdg-open".to_string(), vec![url.to_string()])
}

/// Ask the browser to open `url`.
///
/// The platform handler is waited for, since it exits as soon as the URL has
/// been handed over; a non-zero status is a failure. A configured browser
/// command may be the browser itself, so it is only spawned and a spawn
/// error is the only failure. Output is discarded either way: a browser
/// forked by the launcher would otherwise hold the pipes open.
pub async fn open_url(url: &str, config: &ConverterConfig) -> Result<(), GuideError> {
    let configured = config.browser_command.is_some();
    let (program, args) = browser_invocation(url, config.browser_command.as_deref());
    debug!("Launching browser: {} {:?}", program, args);

    let launched = if configured {
        spawn_browser(&program, &args)
    } else {
        run_launcher(&program, &args).await
    };
    launched.map_err(|reason| GuideError::BrowserOpenFailed {
        url: url.to_string(),
        command: program.clone(),
        reason,
    })?;

    info!("Opened {}", url);
    Ok(())
}

fn launcher_command(program: &str, args: &[String]) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Run a launcher that returns once the URL is handed to the browser.
async fn run_launcher(program: &str, args: &[String]) -> Result<(), String> {
    let status = launcher_command(program, args)
        .status()
        .await
        .map_err(|e| e.to_string())?;
    if status.success() {
        Ok(())
    } else {
        Err(status.to_string())
    }
}

/// Start a browser and leave it running.
fn spawn_browser(program: &str, args: &[String]) -> Result<(), String> {
    launcher_command(program, args)
        .spawn()
        .map(|_child| ())
        .map_err(|e| e.to_string())
}

/// Open a local file in the browser; returns the URL that was opened.
pub async fn open_in_browser(path: &Path, config: &ConverterConfig) -> Result<String, GuideError> {
    let url = file_url(path)?;
    open_url(&url, config).await?;
    Ok(url)
}
