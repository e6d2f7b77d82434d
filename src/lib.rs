//! nifti2png - plot a slice of a NIfTI volume
//!
//! This library parses and validates the plot options, checks them against
//! the input image headers and forwards them to an external renderer.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`inspect`]: NIfTI header preflight checks
//! - [`render`]: Renderer abstraction layer

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod inspect;
pub mod render;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
