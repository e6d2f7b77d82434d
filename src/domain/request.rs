//! Plot request
//!
//! The validated configuration record handed to the renderer.

use crate::domain::{
    CameraAngles, GlyphOptions, IntensityRange, Interpolation, Orientation, SliceSelection,
    TractographyOverlay, WindowSize,
};
use crate::error::DomainError;
use std::path::PathBuf;

/// Everything needed to render one slice plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotRequest {
    /// Main volume
    pub nifti_path: Option<PathBuf>,
    pub slice: SliceSelection,
    pub orientation: Orientation,
    pub size: WindowSize,
    /// Volume to show when the main image is 4D
    pub volume_idx: Option<usize>,
    /// Intensity window; `None` lets the renderer use the image min/max
    pub value_range: Option<IntensityRange>,
    pub interpolation: Interpolation,
    pub scalar_colorbar: bool,
    pub save_path: Option<PathBuf>,
    pub interactive: bool,
    pub tractography: Option<TractographyOverlay>,
    pub glyphs: GlyphOptions,
    /// Binary mask the glass-brain surface is built from
    pub glass_brain: Option<PathBuf>,
    pub camera: CameraAngles,
}

impl PlotRequest {
    /// Check the constraints that span several fields
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.nifti_path.is_none() {
            if self.glyphs.tensor_image.is_some() {
                return Err(DomainError::MissingNiftiPath("tensor_image"));
            }
            if self.glyphs.odf_image.is_some() {
                return Err(DomainError::MissingNiftiPath("odf_image"));
            }
            if self.tractography.is_none() && self.glass_brain.is_none() {
                return Err(DomainError::NothingToPlot);
            }
        }

        Ok(())
    }

    /// Whether the rendered plot is saved or shown
    pub fn keeps_output(&self) -> bool {
        self.save_path.is_some() || self.interactive
    }

    /// Whether a scalar slice is drawn
    pub fn has_slice(&self) -> bool {
        self.nifti_path.is_some()
    }

    /// Short description of the layers in the scene, in drawing order
    pub fn layers(&self) -> Vec<&'static str> {
        let mut layers = Vec::new();
        if self.has_slice() {
            layers.push("slice");
        }
        if self.glyphs.tensor_image.is_some() {
            layers.push("tensor glyphs");
        }
        if self.glyphs.odf_image.is_some() {
            layers.push("odf glyphs");
        }
        if self.tractography.is_some() {
            layers.push("tractography");
        }
        if self.glass_brain.is_some() {
            layers.push("glass brain");
        }
        layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_image() -> PlotRequest {
        PlotRequest {
            nifti_path: Some(PathBuf::from("t1.nii.gz")),
            save_path: Some(PathBuf::from("out.png")),
            ..PlotRequest::default()
        }
    }

    #[test]
    fn test_defaults() {
        let request = PlotRequest::default();
        assert_eq!(request.slice, SliceSelection::Middle);
        assert_eq!(request.orientation, Orientation::Axial);
        assert_eq!(request.size.as_tuple(), (600, 400));
        assert_eq!(request.interpolation, Interpolation::Nearest);
        assert_eq!(request.glyphs.scale, 1.0);
        assert!(!request.interactive);
    }

    #[test]
    fn test_plain_slice_is_valid() {
        assert!(with_image().validate().is_ok());
        assert_eq!(with_image().layers(), vec!["slice"]);
    }

    #[test]
    fn test_glyphs_require_nifti_path() {
        let mut request = with_image();
        request.nifti_path = None;
        request.glyphs.tensor_image = Some(PathBuf::from("dti.nii.gz"));
        assert_eq!(
            request.validate(),
            Err(DomainError::MissingNiftiPath("tensor_image"))
        );

        request.glyphs.tensor_image = None;
        request.glyphs.odf_image = Some(PathBuf::from("fod.nii.gz"));
        assert_eq!(request.validate(), Err(DomainError::MissingNiftiPath("odf_image")));
    }

    #[test]
    fn test_nothing_to_plot() {
        let request = PlotRequest::default();
        assert_eq!(request.validate(), Err(DomainError::NothingToPlot));
    }

    #[test]
    fn test_glass_brain_alone_is_valid() {
        let request = PlotRequest {
            glass_brain: Some(PathBuf::from("mask.nii.gz")),
            interactive: true,
            ..PlotRequest::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.layers(), vec!["glass brain"]);
    }

    #[test]
    fn test_keeps_output() {
        assert!(with_image().keeps_output());

        let mut request = with_image();
        request.save_path = None;
        assert!(!request.keeps_output());
        assert!(request.validate().is_ok());

        request.interactive = true;
        assert!(request.keeps_output());
    }
}
