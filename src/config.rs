//! Configuration for converting or opening the study guide.
//!
//! All behaviour is controlled through [`ConverterConfig`], built via its
//! [`ConverterConfigBuilder`]. The defaults reproduce the fixed file names
//! and wkhtmltopdf flags the tool has always used; the builder exists so the
//! binaries (and tests) can point at other files and other renderer programs.

use crate::error::GuideError;
use crate::progress::ProgressCallback;
use renderer_probe::Renderer;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default input: the HTML study guide in the current directory.
pub const DEFAULT_HTML_FILE: &str = "math_study_guide.html";
/// Default PDF produced by the renderers.
pub const DEFAULT_OUTPUT_FILE: &str = "math_study_guide.pdf";
/// Default LaTeX template file name.
pub const DEFAULT_TEMPLATE_FILE: &str = "math_guide.tex";
/// Stylesheet the HTML guide links to.
pub const DEFAULT_COMPANION_FILE: &str = "style.css";

/// Configuration shared by the converter and the opener.
///
/// # Example
/// ```rust
/// use guide2pdf::ConverterConfig;
///
/// let config = ConverterConfig::builder()
///     .html_file("guide.html")
///     .output_file("guide.pdf")
///     .javascript_delay_ms(8000)
///     .build()
///     .unwrap();
/// assert_eq!(config.javascript_delay_ms, 8000);
/// ```
#[derive(Clone)]
pub struct ConverterConfig {
    /// HTML file to convert or open. Default: `math_study_guide.html`.
    pub html_file: PathBuf,

    /// PDF written by wkhtmltopdf / WeasyPrint. Default: `math_study_guide.pdf`.
    pub output_file: PathBuf,

    /// LaTeX template destination. Default: `math_guide.tex`.
    pub template_file: PathBuf,

    /// Files the HTML guide needs next to it; listed when the guide is missing.
    pub companion_files: Vec<PathBuf>,

    /// wkhtmltopdf `--page-size`. Default: `A4`.
    pub page_size: String,

    /// wkhtmltopdf margin applied to all four sides. Default: `0.75in`.
    pub margin: String,

    /// wkhtmltopdf `--encoding`. Default: `UTF-8`.
    pub encoding: String,

    /// wkhtmltopdf `--javascript-delay` in milliseconds. Default: 5000.
    ///
    /// MathJax typesets after page load; the renderer must wait for it or the
    /// PDF shows raw TeX source.
    pub javascript_delay_ms: u64,

    /// Program used for wkhtmltopdf. Default: `wkhtmltopdf` from `PATH`.
    pub wkhtmltopdf_program: PathBuf,

    /// Python interpreter used to import WeasyPrint. Default: `python3`.
    pub python_program: PathBuf,

    /// Browser command overriding the OS default handler (like `$BROWSER`).
    /// `%s` is replaced by the URL; without `%s` the URL is appended.
    pub browser_command: Option<String>,

    /// Receives renderer start/finish events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            html_file: PathBuf::from(DEFAULT_HTML_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            template_file: PathBuf::from(DEFAULT_TEMPLATE_FILE),
            companion_files: vec![PathBuf::from(DEFAULT_COMPANION_FILE)],
            page_size: "A4".to_string(),
            margin: "0.75in".to_string(),
            encoding: "UTF-8".to_string(),
            javascript_delay_ms: 5000,
            wkhtmltopdf_program: Renderer::Wkhtmltopdf.default_program(),
            python_program: Renderer::WeasyPrint.default_program(),
            browser_command: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("html_file", &self.html_file)
            .field("output_file", &self.output_file)
            .field("template_file", &self.template_file)
            .field("companion_files", &self.companion_files)
            .field("page_size", &self.page_size)
            .field("margin", &self.margin)
            .field("encoding", &self.encoding)
            .field("javascript_delay_ms", &self.javascript_delay_ms)
            .field("wkhtmltopdf_program", &self.wkhtmltopdf_program)
            .field("python_program", &self.python_program)
            .field("browser_command", &self.browser_command)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConverterConfig {
    /// Create a new builder for `ConverterConfig`.
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder {
            config: Self::default(),
        }
    }

    /// The program that drives `renderer`.
    pub fn program_for(&self, renderer: Renderer) -> &Path {
        match renderer {
            Renderer::Wkhtmltopdf => &self.wkhtmltopdf_program,
            Renderer::WeasyPrint => &self.python_program,
        }
    }
}

/// Builder for [`ConverterConfig`].
#[derive(Debug)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    pub fn html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.html_file = path.into();
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_file = path.into();
        self
    }

    pub fn template_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_file = path.into();
        self
    }

    pub fn companion_files(mut self, files: Vec<PathBuf>) -> Self {
        self.config.companion_files = files;
        self
    }

    pub fn page_size(mut self, size: impl Into<String>) -> Self {
        self.config.page_size = size.into();
        self
    }

    pub fn margin(mut self, margin: impl Into<String>) -> Self {
        self.config.margin = margin.into();
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.config.encoding = encoding.into();
        self
    }

    pub fn javascript_delay_ms(mut self, ms: u64) -> Self {
        self.config.javascript_delay_ms = ms;
        self
    }

    pub fn wkhtmltopdf_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.wkhtmltopdf_program = program.into();
        self
    }

    pub fn python_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.python_program = program.into();
        self
    }

    pub fn browser_command(mut self, command: impl Into<String>) -> Self {
        let command = command.into();
        self.config.browser_command = if command.trim().is_empty() {
            None
        } else {
            Some(command)
        };
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConverterConfig, GuideError> {
        let c = &self.config;
        for (name, path) in [
            ("HTML file", &c.html_file),
            ("output file", &c.output_file),
            ("template file", &c.template_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(GuideError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        if c.page_size.trim().is_empty() || c.margin.trim().is_empty() {
            return Err(GuideError::InvalidConfig(
                "page size and margin must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_file_names() {
        let c = ConverterConfig::default();
        assert_eq!(c.html_file, PathBuf::from("math_study_guide.html"));
        assert_eq!(c.output_file, PathBuf::from("math_study_guide.pdf"));
        assert_eq!(c.template_file, PathBuf::from("math_guide.tex"));
        assert_eq!(c.companion_files, vec![PathBuf::from("style.css")]);
        assert_eq!(c.javascript_delay_ms, 5000);
        assert_eq!(c.program_for(Renderer::Wkhtmltopdf), Path::new("wkhtmltopdf"));
        assert_eq!(c.program_for(Renderer::WeasyPrint), Path::new("python3"));
    }

    #[test]
    fn builder_overrides() {
        let c = ConverterConfig::builder()
            .html_file("a.html")
            .output_file("a.pdf")
            .wkhtmltopdf_program("/opt/wk")
            .browser_command("firefox %s")
            .build()
            .unwrap();
        assert_eq!(c.html_file, PathBuf::from("a.html"));
        assert_eq!(c.program_for(Renderer::Wkhtmltopdf), Path::new("/opt/wk"));
        assert_eq!(c.browser_command.as_deref(), Some("firefox %s"));
    }

    #[test]
    fn blank_browser_command_means_default_handler() {
        let c = ConverterConfig::builder().browser_command("  ").build().unwrap();
        assert!(c.browser_command.is_none());
    }

    #[test]
    fn viewing_a_file_named_like_the_output_builds() {
        // Only a conversion writes `output_file`; opening the guide never does.
        let c = ConverterConfig::builder()
            .html_file(DEFAULT_OUTPUT_FILE)
            .build()
            .unwrap();
        assert_eq!(c.html_file, c.output_file);
    }

    #[test]
    fn empty_paths_are_rejected() {
        let err = ConverterConfig::builder().template_file("").build().unwrap_err();
        assert!(err.to_string().contains("template file"));
    }
}
