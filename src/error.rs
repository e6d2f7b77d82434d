//! Unified error types for nifti2png
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from request validation
    #[error("Invalid arguments: {0}")]
    Domain(#[from] DomainError),

    /// Error while checking the input images
    #[error("Preflight check failed: {0}")]
    Inspect(#[from] InspectError),

    /// Error from the external renderer
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// IO error (stdout, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether this error should be reported as a command-line usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, AppError::Domain(_))
    }
}

/// Errors from request validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Slice selector is neither "m" nor a non-negative integer
    #[error("Invalid slice '{0}' (expected an integer or \"m\" for the middle slice)")]
    InvalidSlice(String),

    /// Range given with low >= high or non-finite bounds
    #[error("Invalid {name}: low ({low}) must be less than high ({high})")]
    InvalidRange {
        name: &'static str,
        low: String,
        high: String,
    },

    /// Wrong number of values for a fixed-arity option
    #[error("--{flag} takes exactly {expected} values, got {found}")]
    WrongArity {
        flag: &'static str,
        expected: usize,
        found: usize,
    },

    /// Window dimensions must be positive
    #[error("Invalid window size: {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },

    /// Opacity outside of [0, 1]
    #[error("Invalid tractography opacity: {0} (must be between 0 and 1)")]
    InvalidOpacity(f64),

    /// Glyph scale must be positive
    #[error("Invalid glyph scale: {0} (must be greater than 0)")]
    InvalidScale(f64),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// An option that needs the main image was given without it
    #[error("--{0} requires --nifti_path to be set")]
    MissingNiftiPath(&'static str),

    /// Per-tract values do not line up with tractogram files
    #[error("--tractography_values has {values} values but {paths} tractography files were given")]
    TractographyValueCount { paths: usize, values: usize },

    /// No image, tractogram or glass brain to plot
    #[error("Nothing to plot: give --nifti_path, --tractography or --glass_brain")]
    NothingToPlot,
}

/// Errors from the image preflight checks
#[derive(Error, Debug)]
pub enum InspectError {
    /// Header could not be read
    #[error("Cannot read NIfTI header of {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// Referenced file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Slice index past the end of the oriented axis
    #[error("Slice {index} is out of bounds for {orientation} axis of length {len}")]
    SliceOutOfBounds {
        index: usize,
        orientation: String,
        len: usize,
    },

    /// Volume index given for a 3D image
    #[error("--volume_idx was given but {0} is not a 4D image")]
    NotFourDimensional(PathBuf),

    /// Volume index past the last volume
    #[error("Volume index {index} is out of bounds ({count} volumes)")]
    VolumeOutOfBounds { index: usize, count: usize },

    /// Tensor image without the six tensor components
    #[error("Tensor image {path} has {found} volumes (expected 6: Dxx, Dxy, Dyy, Dxz, Dyz, Dzz)")]
    TensorComponents { path: PathBuf, found: usize },

    /// ODF image whose volume count is not a symmetric SH coefficient count
    #[error("ODF image {path} has {found} volumes, which is not a spherical harmonic coefficient count")]
    ShCoefficients { path: PathBuf, found: usize },

    /// Image grid differs from the main image
    #[error("{path} has spatial shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        path: PathBuf,
        expected: [usize; 3],
        found: [usize; 3],
    },

    /// Glass brain mask must be a single volume
    #[error("Glass brain mask {0} must be a 3D image")]
    MaskNotThreeDimensional(PathBuf),

    /// Directory of --save_path does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A `[defaults]` value the matching flag would reject
    #[error("Invalid default for {key}: {source}")]
    InvalidDefault {
        key: &'static str,
        #[source]
        source: DomainError,
    },
}

/// Errors from the external renderer
#[derive(Error, Debug)]
pub enum RenderError {
    /// Renderer executable could not be found
    #[error("Renderer program '{0}' not found")]
    ProgramNotFound(String),

    /// Renderer could not be started or talked to
    #[error("Failed to run renderer '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Parameters could not be encoded
    #[error("Failed to encode plot parameters: {0}")]
    Payload(#[from] serde_json::Error),

    /// Renderer exited unsuccessfully
    #[error("Renderer '{program}' exited with {status}")]
    Failed { program: String, status: String },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
