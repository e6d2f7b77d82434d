//! Trait definition for the rendering backend
//!
//! The actual plotting lives outside this crate. This trait is the single
//! call made into it, and allows mock implementations in tests.

use crate::domain::PlotRequest;
use crate::error::RenderError;

/// Backend that turns a validated plot request into a picture
pub trait Renderer: Send + Sync {
    /// Human-readable backend name used in log and status messages
    fn name(&self) -> &str;

    /// Render the request, blocking until the backend is done
    ///
    /// Called at most once per process. Nothing observable is returned; the
    /// backend writes `save_path` and/or shows the interactive scene itself.
    fn render(&self, request: &PlotRequest) -> Result<(), RenderError>;
}
