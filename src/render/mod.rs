//! Rendering abstraction layer
//!
//! Provides the trait-based seam to the external plotting routine.

pub mod command;
pub mod payload;
pub mod traits;

pub use command::CommandRenderer;
pub use payload::PlotParameters;
pub use traits::Renderer;
