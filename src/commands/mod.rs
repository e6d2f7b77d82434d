//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod plot;

pub use plot::{plot, run_plot};
