//! Domain models for nifti2png
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod overlay;
pub mod range;
pub mod request;
pub mod view;

pub use overlay::{
    check_opacity, sh_coefficient_count, sh_order_from_count, GlyphOptions, ShBasis, TractographyOverlay,
    CATEGORICAL_COLORMAP, DEFAULT_OPACITY, VALUE_COLORMAP,
};
pub use range::{ColormapRange, IntensityRange, ValueRange};
pub use request::PlotRequest;
pub use view::{CameraAngles, Interpolation, Orientation, SliceSelection, WindowSize};
