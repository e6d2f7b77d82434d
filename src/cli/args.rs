//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and their conversion into a
//! [`PlotRequest`].

use crate::domain::{
    CameraAngles, ColormapRange, GlyphOptions, IntensityRange, Interpolation, Orientation,
    PlotRequest, ShBasis, SliceSelection, TractographyOverlay, WindowSize,
};
use crate::error::DomainError;
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::PathBuf;

/// Plot a slice of a NIFTI file
///
/// Optionally overlays tractography, tensor or ODF glyphs and a glass brain,
/// then hands the scene to the external renderer.
#[derive(Parser, Debug)]
#[command(name = "nifti2png")]
#[command(author, version, about, long_about = None)]
#[command(rename_all = "snake_case", args_override_self = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(short, long, env = "NIFTI2PNG_CONFIG")]
    pub config: Option<String>,

    /// External renderer program that receives the plot parameters as JSON
    #[arg(long, env = "NIFTI2PNG_RENDERER")]
    pub renderer: Option<String>,

    /// Validate and print the plot parameters without rendering
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry_run
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Print shell completions and exit
    #[arg(long, value_enum, exclusive = true, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Path to NIFTI to plot
    #[arg(short, long)]
    pub nifti_path: Option<PathBuf>,

    /// Slice index (integer) or "m" for middle slice
    #[arg(short, long, default_value = "m")]
    pub slice: SliceSelection,

    /// Slice orientation
    #[arg(short, long, value_enum, default_value = "axial")]
    pub orientation: Orientation,

    /// Size of window
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = vec![600, 400]
    )]
    pub size: Vec<u32>,

    /// Optional path to save to
    #[arg(long)]
    pub save_path: Option<PathBuf>,

    /// Whether to interactively show the scene
    #[arg(long)]
    pub interactive: bool,

    /// Optional value range to pass to slicer. Default is min/max of image.
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    pub value_range: Option<Vec<i64>>,

    /// Index of the volume to display if the image is 4D
    #[arg(long)]
    pub volume_idx: Option<usize>,

    /// Interpolation method to use
    #[arg(long, value_enum, default_value = "nearest")]
    pub interpolation: Interpolation,

    /// Whether to show a colorbar for the slice
    #[arg(long)]
    pub scalar_colorbar: bool,

    /// Optional tractogram(s) to plot with slices
    #[arg(long, num_args = 1.., action = ArgAction::Set, value_name = "TRACTOGRAM")]
    pub tractography: Option<Vec<PathBuf>>,

    /// Values used to color each tractogram (one per tractography file)
    #[arg(
        long,
        num_args = 1..,
        action = ArgAction::Set,
        allow_negative_numbers = true,
        requires = "tractography"
    )]
    pub tractography_values: Option<Vec<f64>>,

    /// Colormap for tractography [default: plasma with values, Set1 without]
    #[arg(long, requires = "tractography")]
    pub tractography_cmap: Option<String>,

    /// Range mapped onto the tractography colormap [default: 0 1]
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        value_names = ["LOW", "HIGH"],
        allow_negative_numbers = true,
        requires = "tractography"
    )]
    pub tractography_cmap_range: Option<Vec<f64>>,

    /// Tractogram opacity in range (0, 1)
    #[arg(long, default_value_t = 0.6, requires = "tractography")]
    pub tractography_opacity: f64,

    /// Whether to show a tractography values colorbar
    #[arg(long, requires = "tractography")]
    pub tractography_colorbar: bool,

    /// Path to tensor image, format is Dxx, Dxy, Dyy, Dxz, Dyz, Dzz
    #[arg(long, requires = "nifti_path")]
    pub tensor_image: Option<PathBuf>,

    /// Path to orientation distribution function image represented as spherical harmonics
    #[arg(long, requires = "nifti_path")]
    pub odf_image: Option<PathBuf>,

    /// Spherical harmonic basis of --odf_image
    #[arg(long, value_enum, default_value = "descoteaux07")]
    pub sh_basis: ShBasis,

    /// Scale of the tensor glyphs or ODF glyphs
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Path to binary mask to generate glass brain from
    #[arg(long)]
    pub glass_brain: Option<PathBuf>,

    /// Azimuthal angle of the view
    #[arg(long, visible_alias = "az", allow_negative_numbers = true)]
    pub azimuth: Option<f64>,

    /// Elevation angle of the view
    #[arg(long, visible_alias = "el", allow_negative_numbers = true)]
    pub elevation: Option<f64>,
}

impl Cli {
    /// Convert to a validated PlotRequest domain object
    pub fn to_request(&self) -> Result<PlotRequest, DomainError> {
        let value_range = self
            .value_range
            .as_deref()
            .map(|v| IntensityRange::from_values("value_range", v))
            .transpose()?;

        let tractography = match &self.tractography {
            Some(paths) => {
                let colormap_range = self
                    .tractography_cmap_range
                    .as_deref()
                    .map(|v| ColormapRange::from_values("tractography_cmap_range", v))
                    .transpose()?;

                Some(TractographyOverlay::new(
                    paths.clone(),
                    self.tractography_values.clone(),
                    self.tractography_cmap.clone(),
                    colormap_range,
                    self.tractography_opacity,
                    self.tractography_colorbar,
                )?)
            }
            None => {
                if let Some(values) = &self.tractography_values {
                    return Err(DomainError::TractographyValueCount {
                        paths: 0,
                        values: values.len(),
                    });
                }
                None
            }
        };

        let request = PlotRequest {
            nifti_path: self.nifti_path.clone(),
            slice: self.slice,
            orientation: self.orientation,
            size: WindowSize::from_values(&self.size)?,
            volume_idx: self.volume_idx,
            value_range,
            interpolation: self.interpolation,
            scalar_colorbar: self.scalar_colorbar,
            save_path: self.save_path.clone(),
            interactive: self.interactive,
            tractography,
            glyphs: GlyphOptions::new(
                self.tensor_image.clone(),
                self.odf_image.clone(),
                self.sh_basis,
                self.scale,
            )?,
            glass_brain: self.glass_brain.clone(),
            camera: CameraAngles::new(self.azimuth, self.elevation)?,
        };

        request.validate()?;
        Ok(request)
    }
}

/// Parsed arguments together with where each value came from
#[derive(Debug)]
pub struct ParsedArgs {
    pub cli: Cli,
    matches: ArgMatches,
}

impl ParsedArgs {
    /// Parse from `std::env::args_os()`, exiting with a usage error on failure
    pub fn parse() -> Self {
        Self::try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse from an explicit argument list
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(itr)?;
        let cli = Cli::from_arg_matches(&matches)?;
        Ok(Self { cli, matches })
    }

    /// Whether the user gave this argument (on the command line or through
    /// its environment variable) rather than leaving it at its default
    pub fn is_explicit(&self, id: &str) -> bool {
        matches!(
            self.matches.value_source(id),
            Some(ValueSource::CommandLine | ValueSource::EnvVariable)
        )
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Build a usage error for the plot command line
pub fn usage_error(message: impl std::fmt::Display) -> clap::Error {
    Cli::command().error(clap::error::ErrorKind::ValueValidation, message)
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
