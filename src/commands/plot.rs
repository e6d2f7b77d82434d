//! Plot command implementation
//!
//! Validates the arguments, checks the input images and hands the request
//! to the renderer exactly once.

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::output::{print_output, Message, PlotSummary};
use crate::domain::PlotRequest;
use crate::error::Result;
use crate::inspect::{self, PreflightReport};
use crate::render::{PlotParameters, Renderer};

/// Execute the plot command
pub fn run_plot<R: Renderer>(cli: &Cli, renderer: &R) -> Result<()> {
    let request = cli.to_request()?;
    let report = inspect::preflight(&request)?;
    log::debug!("Preflight: {:?}", report);

    plot(&request, &report, renderer, cli.dry_run, cli.format)
}

/// Render a validated request, or describe it in dry-run mode
pub fn plot<R: Renderer>(
    request: &PlotRequest,
    report: &PreflightReport,
    renderer: &R,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    if dry_run {
        let summary = PlotSummary {
            renderer: renderer.name().to_string(),
            layers: request.layers(),
            parameters: PlotParameters::from(request),
            preflight: report.clone(),
        };
        print_output(&summary, format)?;
        return Ok(());
    }

    if !request.keeps_output() {
        log::warn!("Neither --save_path nor --interactive given; the plot will not be kept");
    }

    log::info!("Rendering {} with {}", request.layers().join(", "), renderer.name());
    renderer.render(request)?;

    let message = match &request.save_path {
        Some(path) => format!("Saved plot to {}", path.display()),
        None => "Plot rendered".to_string(),
    };
    print_output(
        &Message {
            message,
            success: true,
        },
        format,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ParsedArgs;
    use crate::error::{AppError, DomainError, RenderError};
    use crate::mock::MockRenderer;
    use std::path::PathBuf;

    fn image_request() -> PlotRequest {
        PlotRequest {
            nifti_path: Some(PathBuf::from("t1.nii.gz")),
            save_path: Some(PathBuf::from("out.png")),
            ..PlotRequest::default()
        }
    }

    #[test]
    fn test_plot_renders_once() {
        let renderer = MockRenderer::new();
        let request = image_request();
        plot(
            &request,
            &PreflightReport::default(),
            &renderer,
            false,
            OutputFormat::Compact,
        )
        .unwrap();

        assert_eq!(renderer.call_count(), 1);
        assert_eq!(renderer.last_request(), Some(request));
    }

    #[test]
    fn test_dry_run_does_not_render() {
        let renderer = MockRenderer::new();
        plot(
            &image_request(),
            &PreflightReport::default(),
            &renderer,
            true,
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(renderer.call_count(), 0);
    }

    #[test]
    fn test_render_error_propagates() {
        let renderer = MockRenderer::failing();
        let err = plot(
            &image_request(),
            &PreflightReport::default(),
            &renderer,
            false,
            OutputFormat::Table,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Render(RenderError::Failed { .. })));
        assert_eq!(renderer.call_count(), 1);
    }

    #[test]
    fn test_invalid_request_never_renders() {
        let renderer = MockRenderer::new();
        let parsed = ParsedArgs::try_parse_from([
            "nifti2png",
            "--tractography",
            "a.trk",
            "b.trk",
            "--tractography_values",
            "1.0",
        ])
        .unwrap();

        let err = run_plot(&parsed.cli, &renderer).unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::TractographyValueCount { paths: 2, values: 1 })
        ));
        assert!(err.is_usage());
        assert_eq!(renderer.call_count(), 0);
    }

    #[test]
    fn test_unrecognized_flag_never_renders() {
        let renderer = MockRenderer::new();
        let result = ParsedArgs::try_parse_from(["nifti2png", "-n", "t1.nii", "--colour", "red"])
            .map(|parsed| run_plot(&parsed.cli, &renderer));

        assert!(result.is_err());
        assert_eq!(renderer.call_count(), 0);
    }

    #[test]
    fn test_preflight_failure_never_renders() {
        let renderer = MockRenderer::new();
        let parsed =
            ParsedArgs::try_parse_from(["nifti2png", "-n", "/nonexistent/t1.nii.gz"]).unwrap();

        let err = run_plot(&parsed.cli, &renderer).unwrap_err();
        assert!(matches!(err, AppError::Inspect(_)));
        assert_eq!(renderer.call_count(), 0);
    }
}
