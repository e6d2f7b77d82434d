//! Mock implementations for testing
//!
//! Provides a recording renderer for unit testing without the external
//! plotting program.

use crate::domain::PlotRequest;
use crate::error::RenderError;
use crate::render::Renderer;

use std::sync::Mutex;

/// Mock renderer that records every request it receives
#[derive(Debug, Default)]
pub struct MockRenderer {
    calls: Mutex<Vec<PlotRequest>>,
    fail: bool,
}

impl MockRenderer {
    /// Create a renderer that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that records the call and then fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of render calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<PlotRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Renderer for MockRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    fn render(&self, request: &PlotRequest) -> Result<(), RenderError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(RenderError::Failed {
                program: "mock".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let renderer = MockRenderer::new();
        assert_eq!(renderer.call_count(), 0);
        assert!(renderer.last_request().is_none());

        renderer.render(&PlotRequest::default()).unwrap();
        assert_eq!(renderer.call_count(), 1);
        assert_eq!(renderer.last_request(), Some(PlotRequest::default()));
    }

    #[test]
    fn test_failing_mock() {
        let renderer = MockRenderer::failing();
        assert!(renderer.render(&PlotRequest::default()).is_err());
        assert_eq!(renderer.call_count(), 1);
    }
}
