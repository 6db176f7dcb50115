//! The `open-guide` flow: open the HTML guide in the default browser.

use crate::browser;
use crate::config::ConverterConfig;
use crate::error::GuideError;
use crate::guidance;
use std::io::Write;
use std::path::PathBuf;

/// Result of [`open_guide`]; maps onto the process exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened { url: String, path: PathBuf },
    MissingInput,
    BrowserFailed(String),
}

impl OpenOutcome {
    /// 0 when the guide was opened, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            OpenOutcome::Opened { .. } => 0,
            OpenOutcome::MissingInput | OpenOutcome::BrowserFailed(_) => 1,
        }
    }
}

/// Check the guide exists, open it and print tips to `out`.
pub async fn open_guide<W: Write>(
    config: &ConverterConfig,
    out: &mut W,
) -> Result<OpenOutcome, GuideError> {
    let html = &config.html_file;
    let name = html.display().to_string();

    if !html.exists() {
        writeln!(out, "❌ Error: {name} not found!")?;
        writeln!(out, "Please make sure you're in the correct directory.")?;
        writeln!(out, "The following files should be present:")?;
        writeln!(out, "  - {name}")?;
        for companion in &config.companion_files {
            writeln!(out, "  - {}", companion.display())?;
        }
        return Ok(OpenOutcome::MissingInput);
    }

    let result = async {
        let url = browser::file_url(html)?;
        let abs = url.trim_start_matches("file://").to_string();

        writeln!(out, "🚀 Opening Hebrew Mathematical Study Guide...")?;
        writeln!(out, "📁 File: {abs}")?;
        out.flush()?;

        browser::open_url(&url, config).await?;
        Ok::<_, GuideError>((url, PathBuf::from(abs)))
    }
    .await;

    match result {
        Ok((url, path)) => {
            writeln!(out, "✅ Study guide opened in your default browser!")?;
            write!(out, "{}", guidance::VIEWING_TIPS)?;
            Ok(OpenOutcome::Opened { url, path })
        }
        Err(GuideError::Terminal(e)) => Err(GuideError::Terminal(e)),
        Err(e) => {
            writeln!(out, "❌ Error opening browser: {e}")?;
            writeln!(
                out,
                "💡 Manual option: Open {name} directly in your browser"
            )?;
            Ok(OpenOutcome::BrowserFailed(e.to_string()))
        }
    }
}
