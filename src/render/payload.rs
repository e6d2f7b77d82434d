//! Named plot parameters
//!
//! The keyword arguments of the plotting routine, one field each.

use crate::domain::{Interpolation, Orientation, PlotRequest, ShBasis, SliceSelection};
use serde::Serialize;
use std::path::PathBuf;

/// Parameters passed to the plotting routine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotParameters {
    pub nifti_path: Option<PathBuf>,
    pub data_slice: SliceSelection,
    pub orientation: Orientation,
    pub size: (u32, u32),
    pub volume_idx: Option<usize>,
    pub save_path: Option<PathBuf>,
    pub interactive: bool,
    pub value_range: Option<(i64, i64)>,
    pub interpolation: Interpolation,
    pub scalar_colorbar: bool,
    pub tractography: Option<Vec<PathBuf>>,
    pub tractography_opacity: f64,
    pub tractography_values: Option<Vec<f64>>,
    pub tractography_cmap: Option<String>,
    pub tractography_cmap_range: Option<(f64, f64)>,
    pub tractography_colorbar: bool,
    pub tensor_image: Option<PathBuf>,
    pub odf_image: Option<PathBuf>,
    pub sh_basis: ShBasis,
    pub scale: f64,
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub glass_brain_path: Option<PathBuf>,
}

impl From<&PlotRequest> for PlotParameters {
    fn from(request: &PlotRequest) -> Self {
        let tracts = request.tractography.as_ref();

        Self {
            nifti_path: request.nifti_path.clone(),
            data_slice: request.slice,
            orientation: request.orientation,
            size: request.size.as_tuple(),
            volume_idx: request.volume_idx,
            save_path: request.save_path.clone(),
            interactive: request.interactive,
            value_range: request.value_range.map(|r| r.as_tuple()),
            interpolation: request.interpolation,
            scalar_colorbar: request.scalar_colorbar,
            tractography: tracts.map(|t| t.paths().to_vec()),
            tractography_opacity: tracts
                .map_or(crate::domain::DEFAULT_OPACITY, |t| t.opacity()),
            tractography_values: tracts.and_then(|t| t.values().map(<[f64]>::to_vec)),
            tractography_cmap: tracts.map(|t| t.colormap().to_string()),
            tractography_cmap_range: tracts.map(|t| t.colormap_range().as_tuple()),
            tractography_colorbar: tracts.is_some_and(|t| t.colorbar()),
            tensor_image: request.glyphs.tensor_image.clone(),
            odf_image: request.glyphs.odf_image.clone(),
            sh_basis: request.glyphs.sh_basis,
            scale: request.glyphs.scale,
            azimuth: request.camera.azimuth,
            elevation: request.camera.elevation,
            glass_brain_path: request.glass_brain.clone(),
        }
    }
}
