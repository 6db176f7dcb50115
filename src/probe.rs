//! Renderer availability as seen by this tool.
//!
//! Wraps the synchronous [`renderer_probe`] crate: each probe spawns a child
//! process and blocks until it exits, so it runs on tokio's blocking pool.
//! Unavailability is data, never an error: the caller decides which menu
//! entries and fallbacks to offer.

use crate::config::ConverterConfig;
use crate::error::GuideError;
use renderer_probe::{ProbeError, Renderer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Probe result for one renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStatus {
    pub renderer: Renderer,
    /// Program that was probed.
    pub program: PathBuf,
    pub available: bool,
    /// The renderer is present, whether or not it works.
    pub installed: bool,
    pub version: Option<String>,
    /// Why the renderer is unavailable.
    pub detail: Option<String>,
}

impl ToolStatus {
    /// The one-line report shown to the user, e.g. `✓ wkhtmltopdf is available`.
    pub fn status_line(&self) -> String {
        if self.available {
            format!("✓ {} is available", self.renderer)
        } else if self.installed {
            format!("✗ {} is not usable", self.renderer)
        } else {
            format!("✗ {} not found", self.renderer)
        }
    }
}

/// Availability of every known renderer, in preference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub tools: Vec<ToolStatus>,
}

impl Availability {
    /// Whether at least one renderer was detected.
    pub fn any_available(&self) -> bool {
        self.tools.iter().any(|t| t.available)
    }

    /// Detected renderers, in preference order.
    pub fn available_renderers(&self) -> Vec<Renderer> {
        self.tools
            .iter()
            .filter(|t| t.available)
            .map(|t| t.renderer)
            .collect()
    }
}

/// Probe every renderer with the programs named in `config`.
pub async fn probe_renderers(config: &ConverterConfig) -> Result<Availability, GuideError> {
    let targets: Vec<(Renderer, PathBuf)> = Renderer::ALL
        .iter()
        .map(|&r| (r, config.program_for(r).to_path_buf()))
        .collect();

    let tools = tokio::task::spawn_blocking(move || {
        targets
            .into_iter()
            .map(|(renderer, program)| probe_one(renderer, program))
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| GuideError::Internal(format!("Probe task panicked: {}", e)))?;

    Ok(Availability { tools })
}

fn probe_one(renderer: Renderer, program: PathBuf) -> ToolStatus {
    debug!("Probing {} via {}", renderer, program.display());
    match renderer_probe::probe(renderer, &program) {
        Ok(info) => {
            info!(
                "{} available (version {})",
                renderer,
                info.version.as_deref().unwrap_or("unknown")
            );
            ToolStatus {
                renderer,
                program,
                available: true,
                installed: true,
                version: info.version,
                detail: None,
            }
        }
        Err(e) => {
            debug!("{} unavailable: {}", renderer, e);
            let detail = match &e {
                ProbeError::Failed { stderr, .. } if !stderr.is_empty() => stderr.clone(),
                _ => e.to_string(),
            };
            ToolStatus {
                renderer,
                program,
                available: false,
                installed: !e.is_missing(),
                version: None,
                detail: Some(detail),
            }
        }
    }
}
