//! Fixed user-facing guidance: installation instructions and usage tips.

/// Printed when no renderer was detected.
pub const INSTALL_INSTRUCTIONS: &str = "\
\n=== Installation Instructions ===
To convert HTML to PDF, you need one of these tools:

1. wkhtmltopdf (Recommended for better MathJax support):
   macOS: brew install wkhtmltopdf
   Ubuntu/Debian: sudo apt-get install wkhtmltopdf
   Windows: Download from https://wkhtmltopdf.org/downloads.html

2. WeasyPrint (Python-based):
   pip3 install weasyprint
   Note: May require additional system dependencies
";

/// Printed before a WeasyPrint conversion.
pub const WEASYPRINT_WARNING: &str = "\
⚠️  Warning: WeasyPrint doesn't support JavaScript/MathJax.
   Mathematical formulas may not render properly.
";

/// Printed after the browser was opened from the converter.
pub const BROWSER_PRINT_TIP: &str = "💡 You can print to PDF from your browser (Ctrl+P / Cmd+P)";

/// Printed after `open-guide` succeeded.
pub const VIEWING_TIPS: &str = "\
\n💡 Tips for best experience:
  • Wait for mathematical formulas to load completely
  • Use Ctrl/Cmd + Plus/Minus to adjust text size
  • To print to PDF: Ctrl/Cmd + P → Save as PDF
  • For better PDF conversion, run: guide2pdf
";

/// Compile hint shown after the template was written.
pub fn template_compile_hint(template: &str) -> String {
    format!("💡 You can compile this with: pdflatex {template}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_instructions_cover_both_renderers() {
        assert!(INSTALL_INSTRUCTIONS.contains("brew install wkhtmltopdf"));
        assert!(INSTALL_INSTRUCTIONS.contains("pip3 install weasyprint"));
    }

    #[test]
    fn compile_hint_names_file() {
        assert_eq!(
            template_compile_hint("math_guide.tex"),
            "💡 You can compile this with: pdflatex math_guide.tex"
        );
    }
}
