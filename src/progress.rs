//! Progress-callback trait for renderer runs.
//!
//! A wkhtmltopdf run blocks for at least the configured JavaScript delay
//! (five seconds by default), so front ends want to show a spinner while it
//! runs. Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConverterConfigBuilder::progress_callback`] to receive
//! the start and finish events.
//!
//! # Example
//!
//! ```rust
//! use guide2pdf::{ConversionProgressCallback, ConversionReport, ConverterConfig};
//! use std::sync::Arc;
//!
//! struct Log;
//!
//! impl ConversionProgressCallback for Log {
//!     fn on_conversion_complete(&self, report: &ConversionReport) {
//!         eprintln!("wrote {} bytes", report.bytes);
//!     }
//! }
//!
//! let config = ConverterConfig::builder()
//!     .progress_callback(Arc::new(Log) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::convert::ConversionReport;
use renderer_probe::Renderer;
use std::path::Path;
use std::sync::Arc;

/// Called around each renderer invocation.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called just before the renderer process is spawned.
    fn on_conversion_start(&self, renderer: Renderer, input: &Path, output: &Path) {
        let _ = (renderer, input, output);
    }

    /// Called when the renderer exited successfully.
    fn on_conversion_complete(&self, report: &ConversionReport) {
        let _ = report;
    }

    /// Called when the renderer could not be started or exited non-zero.
    fn on_conversion_error(&self, renderer: Renderer, error: &str) {
        let _ = (renderer, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConverterConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, _renderer: Renderer, _input: &Path, _output: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _report: &ConversionReport) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_error(&self, _renderer: Renderer, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn report() -> ConversionReport {
        ConversionReport {
            renderer: Renderer::Wkhtmltopdf,
            input: PathBuf::from("in.html"),
            output: PathBuf::from("out.pdf"),
            bytes: 1024,
            duration_ms: 5100,
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(Renderer::WeasyPrint, Path::new("a"), Path::new("b"));
        cb.on_conversion_complete(&report());
        cb.on_conversion_error(Renderer::WeasyPrint, "boom");
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_conversion_start(Renderer::Wkhtmltopdf, Path::new("a"), Path::new("b"));
        tracker.on_conversion_complete(&report());
        tracker.on_conversion_start(Renderer::Wkhtmltopdf, Path::new("a"), Path::new("b"));
        tracker.on_conversion_error(Renderer::Wkhtmltopdf, "exit 1");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_conversion_complete(&report());
    }
}
