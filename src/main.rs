//! nifti2png - plot a slice of a NIfTI volume
//!
//! A command-line tool that validates plot options for a NIfTI image and its
//! overlays, then forwards them to the external renderer.

use nifti2png::cli::args::{generate_completions, usage_error, ParsedArgs};
use nifti2png::commands::run_plot;
use nifti2png::config::{Config, ConfigBuilder};
use nifti2png::error::{AppError, InspectError, RenderError};
use nifti2png::render::CommandRenderer;

fn main() {
    // Parse CLI arguments
    let mut args = ParsedArgs::parse();

    if let Some(shell) = args.cli.completions {
        generate_completions(shell);
        return;
    }

    let config = ConfigBuilder::new()
        .with_file(args.cli.config.as_deref())
        .map(|builder| {
            builder
                .with_verbose(args.cli.verbose.then_some(true))
                .with_renderer(args.cli.renderer.clone())
                .build()
        });

    // Initialize logging once the verbose setting is known
    let verbose = config.as_ref().map_or(args.cli.verbose, |c| c.general.verbose);
    init_logging(verbose);

    let result = config
        .map_err(AppError::from)
        .and_then(|config| run(&mut args, config));

    if let Err(e) = result {
        if e.is_usage() {
            usage_error(&e).exit();
        }
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &mut ParsedArgs, config: Config) -> Result<(), AppError> {
    config.defaults.apply_to(args);

    let renderer = CommandRenderer::from_config(&config.renderer);
    log::debug!("Using renderer {:?}", renderer);
    run_plot(&args.cli, &renderer)
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Render(RenderError::ProgramNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Set the renderer with --renderer, NIFTI2PNG_RENDERER,");
            eprintln!("      or 'program' in the [renderer] section of the config file.");
            eprintln!("      Use --dry_run to check the arguments without rendering.");
        }
        AppError::Inspect(InspectError::SliceOutOfBounds { len, .. }) => {
            eprintln!();
            eprintln!(
                "Hint: Valid slices are 0-{}, or \"m\" for the middle slice.",
                len.saturating_sub(1)
            );
        }
        AppError::Inspect(InspectError::Unreadable { .. }) => {
            eprintln!();
            eprintln!("Hint: Only NIfTI-1 and NIfTI-2 files (.nii or .nii.gz) can be read.");
        }
        _ => {}
    }
}
