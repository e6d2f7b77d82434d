//! Configuration system
//!
//! Handles TOML config file parsing and merging file defaults with CLI
//! arguments.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::cli::args::ParsedArgs;
use crate::domain::{check_opacity, GlyphOptions, Interpolation, Orientation, ShBasis, WindowSize};
use crate::error::{ConfigError, DomainError};
use serde::{Deserialize, Serialize};

/// Program the plot parameters are sent to when nothing else is configured
pub const DEFAULT_RENDERER: &str = "plot_nifti";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// External renderer settings
    pub renderer: RendererConfig,
    /// Defaults for plot options not given on the command line
    pub defaults: PlotDefaults,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
}

/// External renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Executable to run
    pub program: String,
    /// Arguments passed before the parameters are written to stdin
    pub args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_RENDERER.to_string(),
            args: Vec::new(),
        }
    }
}

/// Plot option defaults
///
/// Each value replaces the built-in default of the matching flag, but never
/// a value the user passed explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlotDefaults {
    pub orientation: Option<Orientation>,
    pub size: Option<[u32; 2]>,
    pub interpolation: Option<Interpolation>,
    pub tractography_cmap: Option<String>,
    pub tractography_opacity: Option<f64>,
    pub sh_basis: Option<ShBasis>,
    pub scale: Option<f64>,
}

impl PlotDefaults {
    /// Check each value the way the matching flag is checked
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |key: &'static str| move |source: DomainError| ConfigError::InvalidDefault { key, source };

        if let Some([width, height]) = self.size {
            WindowSize::new(width, height).map_err(invalid("size"))?;
        }
        if let Some(opacity) = self.tractography_opacity {
            check_opacity(opacity).map_err(invalid("tractography_opacity"))?;
        }
        if let Some(scale) = self.scale {
            GlyphOptions::new(None, None, ShBasis::default(), scale).map_err(invalid("scale"))?;
        }
        if let Some(cmap) = &self.tractography_cmap {
            if cmap.trim().is_empty() {
                return Err(invalid("tractography_cmap")(DomainError::InvalidValue(
                    "colormap name is empty".to_string(),
                )));
            }
        }
        Ok(())
    }

    /// Fill every argument the user left at its built-in default
    pub fn apply_to(&self, args: &mut ParsedArgs) {
        macro_rules! fill {
            ($field:ident) => {
                if let Some(value) = &self.$field {
                    if !args.is_explicit(stringify!($field)) {
                        log::debug!("Using configured {} = {:?}", stringify!($field), value);
                        args.cli.$field = value.clone();
                    }
                }
            };
        }

        fill!(orientation);
        fill!(interpolation);
        fill!(tractography_opacity);
        fill!(sh_basis);
        fill!(scale);

        if let Some(cmap) = &self.tractography_cmap {
            if !args.is_explicit("tractography_cmap") {
                args.cli.tractography_cmap = Some(cmap.clone());
            }
        }

        if let Some(size) = self.size {
            if !args.is_explicit("size") {
                args.cli.size = size.to_vec();
            }
        }
    }
}
