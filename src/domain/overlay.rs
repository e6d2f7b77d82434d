//! Overlay domain types
//!
//! Tractography streamlines and tensor/ODF glyphs drawn on top of the slice.

use crate::domain::ColormapRange;
use crate::error::DomainError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Colormap used when every tractogram has a value
pub const VALUE_COLORMAP: &str = "plasma";

/// Colormap used to tell tractograms apart when no values are given
pub const CATEGORICAL_COLORMAP: &str = "Set1";

/// Default tractogram opacity
pub const DEFAULT_OPACITY: f64 = 0.6;

/// Check that a tractogram opacity lies in `[0, 1]`
pub fn check_opacity(opacity: f64) -> Result<f64, DomainError> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(DomainError::InvalidOpacity(opacity));
    }
    Ok(opacity)
}

/// Streamline overlays and how to color them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractographyOverlay {
    paths: Vec<PathBuf>,
    values: Option<Vec<f64>>,
    colormap: String,
    colormap_range: ColormapRange,
    opacity: f64,
    colorbar: bool,
}

impl TractographyOverlay {
    /// Create a validated overlay
    ///
    /// `values`, when given, must hold one entry per tractogram. A missing
    /// colormap resolves to [`VALUE_COLORMAP`] or [`CATEGORICAL_COLORMAP`].
    pub fn new(
        paths: Vec<PathBuf>,
        values: Option<Vec<f64>>,
        colormap: Option<String>,
        colormap_range: Option<ColormapRange>,
        opacity: f64,
        colorbar: bool,
    ) -> Result<Self, DomainError> {
        if let Some(v) = &values {
            if v.len() != paths.len() {
                return Err(DomainError::TractographyValueCount {
                    paths: paths.len(),
                    values: v.len(),
                });
            }
            if let Some(bad) = v.iter().find(|x| !x.is_finite()) {
                return Err(DomainError::InvalidValue(format!(
                    "tractography value {} is not finite",
                    bad
                )));
            }
        }

        let opacity = check_opacity(opacity)?;

        let colormap = match colormap {
            Some(name) if name.trim().is_empty() => {
                return Err(DomainError::InvalidValue(
                    "tractography colormap name is empty".to_string(),
                ))
            }
            Some(name) => name,
            None if values.is_some() => VALUE_COLORMAP.to_string(),
            None => CATEGORICAL_COLORMAP.to_string(),
        };

        if colorbar && values.is_none() {
            log::warn!("--tractography_colorbar has no effect without --tractography_values");
        }

        Ok(Self {
            paths,
            values,
            colormap,
            colormap_range: colormap_range.unwrap_or_default(),
            opacity,
            colorbar,
        })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn values(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }

    pub fn colormap(&self) -> &str {
        &self.colormap
    }

    pub fn colormap_range(&self) -> ColormapRange {
        self.colormap_range
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn colorbar(&self) -> bool {
        self.colorbar
    }
}

/// Spherical harmonic basis of an ODF image
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShBasis {
    #[default]
    #[value(name = "descoteaux07")]
    #[serde(rename = "descoteaux07")]
    Descoteaux07,
    #[value(name = "tournier07")]
    #[serde(rename = "tournier07")]
    Tournier07,
}

impl fmt::Display for ShBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShBasis::Descoteaux07 => write!(f, "descoteaux07"),
            ShBasis::Tournier07 => write!(f, "tournier07"),
        }
    }
}

/// Tensor and ODF glyph settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphOptions {
    pub tensor_image: Option<PathBuf>,
    pub odf_image: Option<PathBuf>,
    pub sh_basis: ShBasis,
    pub scale: f64,
}

impl GlyphOptions {
    /// Create validated glyph options; `scale` must be finite and positive
    pub fn new(
        tensor_image: Option<PathBuf>,
        odf_image: Option<PathBuf>,
        sh_basis: ShBasis,
        scale: f64,
    ) -> Result<Self, DomainError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DomainError::InvalidScale(scale));
        }
        Ok(Self {
            tensor_image,
            odf_image,
            sh_basis,
            scale,
        })
    }
}

impl Default for GlyphOptions {
    fn default() -> Self {
        Self {
            tensor_image: None,
            odf_image: None,
            sh_basis: ShBasis::default(),
            scale: 1.0,
        }
    }
}

/// Number of coefficients of a symmetric SH expansion of even order `order`
pub const fn sh_coefficient_count(order: u32) -> usize {
    ((order as usize + 1) * (order as usize + 2)) / 2
}

/// Infer the even SH order from a coefficient count
///
/// Returns `None` if `count` is not `(l+1)(l+2)/2` for any even `l`.
pub fn sh_order_from_count(count: usize) -> Option<u32> {
    (0..=30u32)
        .step_by(2)
        .map(|order| (order, sh_coefficient_count(order)))
        .take_while(|&(_, n)| n <= count)
        .find(|&(_, n)| n == count)
        .map(|(order, _)| order)
}
