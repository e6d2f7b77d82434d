//! External program renderer
//!
//! Runs the plotting program as a child process and hands it the plot
//! parameters as a JSON object on stdin.

use crate::config::RendererConfig;
use crate::domain::PlotRequest;
use crate::error::RenderError;
use crate::render::payload::PlotParameters;
use crate::render::traits::Renderer;

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Renderer backed by an external executable
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Create a renderer for `program`, run with `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create from the `[renderer]` configuration section
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    fn io_error(&self, source: std::io::Error) -> RenderError {
        RenderError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

impl Renderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.program
    }

    fn render(&self, request: &PlotRequest) -> Result<(), RenderError> {
        let payload = serde_json::to_vec(&PlotParameters::from(request))?;

        log::debug!("Starting renderer: {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RenderError::ProgramNotFound(self.program.clone()),
                _ => self.io_error(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // Dropping stdin closes the pipe so the renderer sees EOF
            match stdin.write_all(&payload) {
                Ok(()) => {}
                // The renderer may exit before reading; its status says why
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    log::warn!("Renderer closed its input before reading the parameters");
                }
                Err(e) => return Err(self.io_error(e)),
            }
        }

        let status = child.wait().map_err(|e| self.io_error(e))?;
        if !status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }

        log::debug!("Renderer {} finished", self.program);
        Ok(())
    }
}
