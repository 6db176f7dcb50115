//! The interactive converter: check the guide, probe renderers, show the
//! menu, run the chosen action.
//!
//! Every failure is reported on the output and ends the session; nothing is
//! retried. The session reads answers from any [`AsyncBufRead`] so the binary
//! can race it against Ctrl-C, and writes to any [`Write`] so tests can
//! capture the transcript.

use crate::config::ConverterConfig;
use crate::convert::{self, ActionOutcome};
use crate::error::{ChoiceError, GuideError};
use crate::guidance;
use crate::menu::{Menu, Method};
use crate::probe::{self, Availability};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// How a converter session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The HTML guide does not exist; nothing else was attempted.
    MissingInput,
    /// The chosen action succeeded.
    Completed(ActionOutcome),
    /// The chosen action ran and failed; the message was printed.
    ActionFailed(String),
    /// The number did not name a menu entry.
    InvalidChoice,
    /// The answer was not a number.
    InvalidInput,
    /// Input ended before an answer was given.
    Cancelled,
}

/// One run of the interactive converter.
pub struct ConverterSession<'a, R, W> {
    config: &'a ConverterConfig,
    input: R,
    out: W,
}

impl<'a, R, W> ConverterSession<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(config: &'a ConverterConfig, input: R, out: W) -> Self {
        Self { config, input, out }
    }

    /// Run the full interactive flow.
    pub async fn run(&mut self) -> Result<SessionOutcome, GuideError> {
        writeln!(self.out, "=== Hebrew Mathematical Text Converter ===")?;
        writeln!(
            self.out,
            "This tool helps convert your HTML study guide to PDF format."
        )?;

        if !self.input_exists()? {
            return Ok(SessionOutcome::MissingInput);
        }

        let availability = probe::probe_renderers(self.config).await?;
        self.print_availability(&availability)?;

        if !availability.any_available() {
            debug!("No renderer found; only the fallbacks are offered");
            self.print_no_renderer_help()?;
        }

        let menu = Menu::from_availability(&availability);
        writeln!(self.out, "\nAvailable conversion options:")?;
        write!(self.out, "{}", menu.render())?;

        let Some(answer) = self.ask(&menu.prompt()).await? else {
            return self.cancelled();
        };

        match menu.select(&answer) {
            Ok(method) => self.perform(method).await,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                Ok(match e {
                    ChoiceError::NotANumber { .. } => SessionOutcome::InvalidInput,
                    ChoiceError::OutOfRange { .. } => SessionOutcome::InvalidChoice,
                })
            }
        }
    }

    /// Run one method without probing or prompting.
    pub async fn run_method(&mut self, method: Method) -> Result<SessionOutcome, GuideError> {
        if !self.input_exists()? {
            return Ok(SessionOutcome::MissingInput);
        }
        self.perform(method).await
    }

    /// Run `method` and report the result.
    pub async fn perform(&mut self, method: Method) -> Result<SessionOutcome, GuideError> {
        let html = self.config.html_file.display().to_string();
        match method {
            Method::Wkhtmltopdf => writeln!(self.out, "Converting {html} to PDF...")?,
            Method::WeasyPrint => {
                writeln!(self.out, "Converting {html} to PDF using WeasyPrint...")?;
                write!(self.out, "{}", guidance::WEASYPRINT_WARNING)?;
            }
            Method::Browser | Method::LatexTemplate => {}
        }
        self.out.flush()?;

        match convert::execute(method, self.config).await {
            Ok(outcome) => {
                self.report_success(&outcome)?;
                Ok(SessionOutcome::Completed(outcome))
            }
            Err(e) => {
                let line = failure_line(method, &e);
                writeln!(self.out, "{line}")?;
                Ok(SessionOutcome::ActionFailed(line))
            }
        }
    }

    fn input_exists(&mut self) -> Result<bool, GuideError> {
        if self.config.html_file.exists() {
            return Ok(true);
        }
        writeln!(
            self.out,
            "✗ Error: {} not found!",
            self.config.html_file.display()
        )?;
        writeln!(
            self.out,
            "Please make sure the HTML file is in the current directory."
        )?;
        Ok(false)
    }

    fn print_availability(&mut self, availability: &Availability) -> Result<(), GuideError> {
        for tool in &availability.tools {
            writeln!(self.out, "{}", tool.status_line())?;
        }
        Ok(())
    }

    fn print_no_renderer_help(&mut self) -> Result<(), GuideError> {
        writeln!(self.out, "\n✗ No PDF conversion tools available.")?;
        write!(self.out, "{}", guidance::INSTALL_INSTRUCTIONS)?;
        writeln!(
            self.out,
            "\n💡 Alternative: Open {} in your browser and print to PDF.",
            self.config.html_file.display()
        )?;
        Ok(())
    }

    fn report_success(&mut self, outcome: &ActionOutcome) -> Result<(), GuideError> {
        match outcome {
            ActionOutcome::Converted(report) => {
                writeln!(self.out, "✓ Successfully created {}", report.output.display())?;
            }
            ActionOutcome::BrowserOpened { .. } => {
                writeln!(
                    self.out,
                    "✓ Opened {} in browser",
                    self.config.html_file.display()
                )?;
                writeln!(self.out, "{}", guidance::BROWSER_PRINT_TIP)?;
            }
            ActionOutcome::TemplateWritten { path } => {
                let name = path.display().to_string();
                writeln!(self.out, "✓ Created basic LaTeX template: {name}")?;
                writeln!(self.out, "{}", guidance::template_compile_hint(&name))?;
            }
        }
        Ok(())
    }

    /// Print `prompt` and read one line. `None` means end of input.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>, GuideError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        // Raw bytes: an answer that is not UTF-8 is still just a wrong answer.
        let mut line = Vec::new();
        let n = self.input.read_until(b'\n', &mut line).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    fn cancelled(&mut self) -> Result<SessionOutcome, GuideError> {
        writeln!(self.out, "\nOperation cancelled.")?;
        Ok(SessionOutcome::Cancelled)
    }
}

fn failure_line(method: Method, err: &GuideError) -> String {
    match (method, err) {
        (Method::Browser, e) => format!("✗ Error opening browser: {e}"),
        (_, GuideError::RendererFailed { .. }) | (Method::LatexTemplate, _) => {
            format!("✗ Error: {err}")
        }
        (_, e) => format!("✗ Error during conversion: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn failure_lines() {
        let renderer_failed = GuideError::RendererFailed {
            renderer: renderer_probe::Renderer::Wkhtmltopdf,
            status: exit_status(1),
            stderr: "Exit with code 1 due to network error".into(),
        };
        assert_eq!(
            failure_line(Method::Wkhtmltopdf, &renderer_failed),
            "✗ Error: Exit with code 1 due to network error"
        );

        let missing = GuideError::RendererNotFound {
            renderer: renderer_probe::Renderer::WeasyPrint,
            program: PathBuf::from("python3"),
        };
        assert!(failure_line(Method::WeasyPrint, &missing)
            .starts_with("✗ Error during conversion: WeasyPrint not found"));

        let browser = GuideError::BrowserOpenFailed {
            url: "file:///g.html".into(),
            command: "xdg-open".into(),
            reason: "no handler".into(),
        };
        assert!(failure_line(Method::Browser, &browser).starts_with("✗ Error opening browser:"));
    }

    #[cfg(unix)]
    fn exit_status(code: i32) -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> std::process::ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code as u32)
    }

    #[tokio::test]
    async fn missing_input_stops_before_probing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConverterConfig::builder()
            .html_file(dir.path().join("math_study_guide.html"))
            .output_file(dir.path().join("math_study_guide.pdf"))
            .build()
            .unwrap();

        let mut out = Vec::new();
        let outcome = ConverterSession::new(&config, &b"1\n"[..], &mut out)
            .run()
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::MissingInput);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("math_study_guide.html not found!"), "got: {text}");
        assert!(!text.contains("Available conversion options"));
        assert!(!text.contains("is available") && !text.contains("not found\n"));
    }

    fn config_without_renderers(dir: &std::path::Path) -> ConverterConfig {
        std::fs::write(dir.join("math_study_guide.html"), "<html></html>").unwrap();
        ConverterConfig::builder()
            .html_file(dir.join("math_study_guide.html"))
            .output_file(dir.join("math_study_guide.pdf"))
            .template_file(dir.join("math_guide.tex"))
            .wkhtmltopdf_program(dir.join("no-wkhtmltopdf"))
            .python_program(dir.join("no-python3"))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn undecodable_answer_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_without_renderers(dir.path());

        let mut out = Vec::new();
        let outcome = ConverterSession::new(&config, &b"\xff\xfe\n"[..], &mut out)
            .run()
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::InvalidInput);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Invalid input! Please enter a number.\n"), "got: {text}");
    }

    #[tokio::test]
    async fn no_renderer_menu_reaches_template() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_without_renderers(dir.path());

        let mut out = Vec::new();
        let outcome = ConverterSession::new(&config, &b"2\n"[..], &mut out)
            .run()
            .await
            .unwrap();

        assert!(
            matches!(outcome, SessionOutcome::Completed(ActionOutcome::TemplateWritten { .. })),
            "got: {outcome:?}"
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("✗ No PDF conversion tools available."), "got: {text}");
        assert!(text.contains("1. Open in browser (manual PDF printing)\n2. Create LaTeX template\n"));
        assert!(text.contains("Choose an option (1-2): "));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("math_guide.tex")).unwrap(),
            crate::template::LATEX_TEMPLATE
        );
    }
}
