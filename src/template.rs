//! The LaTeX skeleton offered when no renderer is wanted.
//!
//! The template is a fixed document written verbatim; the user completes it
//! by hand and compiles it with `pdflatex`.

use crate::error::GuideError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// The template, byte for byte.
pub const LATEX_TEMPLATE: &str = r#"
\documentclass[12pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[hebrew]{babel}
\usepackage{amsmath,amsfonts,amssymb}
\usepackage{geometry}
\usepackage{fancyhdr}
\usepackage{xcolor}
\usepackage{tcolorbox}

\geometry{margin=2cm}
\pagestyle{fancy}
\fancyhf{}
\fancyhead[C]{למידת אינפי 2: מדריך לימוד מקיף}
\fancyfoot[C]{\thepage}

% Define colored boxes for different content types
\newtcolorbox{definition}{colback=cyan!5!white,colframe=cyan!75!black}
\newtcolorbox{theorem}{colback=red!5!white,colframe=red!75!black}
\newtcolorbox{property}{colback=purple!5!white,colframe=purple!75!black}

\begin{document}

\title{למידת אינפי 2: מדריך לימוד מקיף}
\author{מדריך מתמטי מעוצב}
\date{}
\maketitle

\section{מבוא}
מדריך לימוד זה נועד לסייע לך בחזרה על החומר בקורס אינפי 2.

% Add more content here...
% This is a basic template that can be expanded

\end{document}
"#;

/// Write [`LATEX_TEMPLATE`] to `path`, replacing any existing file.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over `path`, so a reader never sees a half-written template.
pub async fn write_template(path: &Path) -> Result<PathBuf, GuideError> {
    let path = path.to_path_buf();
    let written = tokio::task::spawn_blocking(move || write_template_blocking(&path).map(|_| path))
        .await
        .map_err(|e| GuideError::Internal(format!("Template task panicked: {}", e)))??;

    info!("Wrote LaTeX template to {}", written.display());
    Ok(written)
}

fn write_template_blocking(path: &Path) -> Result<(), GuideError> {
    let fail = |source: std::io::Error| GuideError::TemplateWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(fail)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(fail)?;
    tmp.write_all(LATEX_TEMPLATE.as_bytes()).map_err(fail)?;
    tmp.flush().map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}
