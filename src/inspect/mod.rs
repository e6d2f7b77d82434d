//! Preflight checks
//!
//! Reads the headers of every image a request references and checks the
//! request against their shapes before the renderer is started.

pub mod volume;

pub use volume::VolumeInfo;

use crate::domain::{sh_order_from_count, PlotRequest, SliceSelection};
use crate::error::InspectError;
use serde::Serialize;
use std::path::Path;

/// Number of volumes in a diffusion tensor image (Dxx, Dxy, Dyy, Dxz, Dyz, Dzz)
pub const TENSOR_COMPONENTS: usize = 6;

/// What the preflight learned about the inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreflightReport {
    /// Dimensions of the main image
    pub image_shape: Option<Vec<usize>>,
    /// Number of volumes in the main image
    pub volume_count: Option<usize>,
    /// Slice index the selection resolves to
    pub slice_index: Option<usize>,
    /// Length of the oriented axis
    pub slice_count: Option<usize>,
    /// Order of the ODF spherical harmonic expansion
    pub sh_order: Option<u32>,
    /// Number of tractogram files found
    pub tractogram_count: usize,
}

/// Run all checks, reading headers from disk
pub fn preflight(request: &PlotRequest) -> Result<PreflightReport, InspectError> {
    preflight_with(request, |path| VolumeInfo::from_file(path))
}

/// Run all checks with a custom header loader
pub fn preflight_with<F>(request: &PlotRequest, mut load: F) -> Result<PreflightReport, InspectError>
where
    F: FnMut(&Path) -> Result<VolumeInfo, InspectError>,
{
    let mut report = PreflightReport::default();

    if let Some(path) = &request.nifti_path {
        let image = load(path)?;
        let shape = image.spatial_shape();
        let axis_len = shape[request.orientation.axis()];

        if let SliceSelection::Index(index) = request.slice {
            if index >= axis_len {
                return Err(InspectError::SliceOutOfBounds {
                    index,
                    orientation: request.orientation.to_string(),
                    len: axis_len,
                });
            }
        }
        report.slice_index = request.slice.resolve(axis_len);
        report.slice_count = Some(axis_len);

        if let Some(index) = request.volume_idx {
            if !image.is_multi_volume() {
                return Err(InspectError::NotFourDimensional(path.clone()));
            }
            if index >= image.volume_count() {
                return Err(InspectError::VolumeOutOfBounds {
                    index,
                    count: image.volume_count(),
                });
            }
        } else if image.is_multi_volume() {
            log::debug!(
                "{} holds {} volumes and no --volume_idx was given",
                path.display(),
                image.volume_count()
            );
        }

        if let Some(tensor) = &request.glyphs.tensor_image {
            let info = load(tensor)?;
            if info.volume_count() != TENSOR_COMPONENTS {
                return Err(InspectError::TensorComponents {
                    path: tensor.clone(),
                    found: info.volume_count(),
                });
            }
            check_same_grid(&info, shape)?;
        }

        if let Some(odf) = &request.glyphs.odf_image {
            let info = load(odf)?;
            let order = sh_order_from_count(info.volume_count()).ok_or_else(|| {
                InspectError::ShCoefficients {
                    path: odf.clone(),
                    found: info.volume_count(),
                }
            })?;
            check_same_grid(&info, shape)?;
            log::debug!("ODF image {} has SH order {}", odf.display(), order);
            report.sh_order = Some(order);
        }

        report.image_shape = Some(image.dims().to_vec());
        report.volume_count = Some(image.volume_count());
    }

    if let Some(mask) = &request.glass_brain {
        let info = load(mask)?;
        if info.volume_count() != 1 {
            return Err(InspectError::MaskNotThreeDimensional(mask.clone()));
        }
    }

    if let Some(tracts) = &request.tractography {
        for path in tracts.paths() {
            if !path.is_file() {
                return Err(InspectError::FileNotFound(path.clone()));
            }
        }
        report.tractogram_count = tracts.paths().len();
    }

    if let Some(save_path) = &request.save_path {
        if let Some(parent) = save_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(InspectError::OutputDirMissing(parent.to_path_buf()));
            }
        }
    }

    Ok(report)
}

fn check_same_grid(info: &VolumeInfo, expected: [usize; 3]) -> Result<(), InspectError> {
    let found = info.spatial_shape();
    if found != expected {
        return Err(InspectError::ShapeMismatch {
            path: info.path().to_path_buf(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GlyphOptions, Orientation, ShBasis, TractographyOverlay};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn loader(
        images: &[(&str, Vec<usize>)],
    ) -> impl FnMut(&Path) -> Result<VolumeInfo, InspectError> {
        let images: HashMap<PathBuf, Vec<usize>> = images
            .iter()
            .map(|(p, d)| (PathBuf::from(p), d.clone()))
            .collect();
        move |path: &Path| {
            images
                .get(path)
                .map(|dims| VolumeInfo::new(path, dims.clone()))
                .ok_or_else(|| InspectError::FileNotFound(path.to_path_buf()))
        }
    }

    fn request(path: &str) -> PlotRequest {
        PlotRequest {
            nifti_path: Some(PathBuf::from(path)),
            ..PlotRequest::default()
        }
    }

    #[test]
    fn test_middle_slice_per_orientation() {
        let images = [("t1.nii", vec![182, 218, 181])];
        let mut req = request("t1.nii");

        let report = preflight_with(&req, loader(&images)).unwrap();
        assert_eq!(report.slice_index, Some(90));
        assert_eq!(report.slice_count, Some(181));
        assert_eq!(report.image_shape, Some(vec![182, 218, 181]));
        assert_eq!(report.volume_count, Some(1));

        req.orientation = Orientation::Sagittal;
        let report = preflight_with(&req, loader(&images)).unwrap();
        assert_eq!(report.slice_index, Some(91));

        req.orientation = Orientation::Coronal;
        let report = preflight_with(&req, loader(&images)).unwrap();
        assert_eq!(report.slice_index, Some(109));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let images = [("t1.nii", vec![64, 64, 30])];
        let mut req = request("t1.nii");
        req.slice = SliceSelection::Index(29);
        assert_eq!(preflight_with(&req, loader(&images)).unwrap().slice_index, Some(29));

        req.slice = SliceSelection::Index(30);
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::SliceOutOfBounds { index: 30, len: 30, .. }));
    }

    #[test]
    fn test_volume_index_checks() {
        let images = [("t1.nii", vec![64, 64, 30]), ("dwi.nii", vec![64, 64, 30, 33])];

        let mut req = request("t1.nii");
        req.volume_idx = Some(0);
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::NotFourDimensional(_)));

        let mut req = request("dwi.nii");
        req.volume_idx = Some(32);
        let report = preflight_with(&req, loader(&images)).unwrap();
        assert_eq!(report.volume_count, Some(33));

        req.volume_idx = Some(33);
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::VolumeOutOfBounds { index: 33, count: 33 }));
    }

    #[test]
    fn test_tensor_image_checks() {
        let images = [
            ("fa.nii", vec![96, 96, 60]),
            ("dti.nii", vec![96, 96, 60, 6]),
            ("dwi.nii", vec![96, 96, 60, 33]),
            ("dti_lowres.nii", vec![48, 48, 30, 6]),
        ];
        let mut req = request("fa.nii");

        req.glyphs.tensor_image = Some(PathBuf::from("dti.nii"));
        assert!(preflight_with(&req, loader(&images)).is_ok());

        req.glyphs.tensor_image = Some(PathBuf::from("dwi.nii"));
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::TensorComponents { found: 33, .. }));

        req.glyphs.tensor_image = Some(PathBuf::from("dti_lowres.nii"));
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_odf_image_checks() {
        let images = [
            ("fa.nii", vec![96, 96, 60]),
            ("fod.nii", vec![96, 96, 60, 45]),
            ("bad.nii", vec![96, 96, 60, 44]),
        ];
        let mut req = request("fa.nii");
        req.glyphs =
            GlyphOptions::new(None, Some(PathBuf::from("fod.nii")), ShBasis::Tournier07, 1.0)
                .unwrap();
        let report = preflight_with(&req, loader(&images)).unwrap();
        assert_eq!(report.sh_order, Some(8));

        req.glyphs.odf_image = Some(PathBuf::from("bad.nii"));
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::ShCoefficients { found: 44, .. }));
    }

    #[test]
    fn test_glass_brain_must_be_3d() {
        let images = [("mask.nii", vec![91, 109, 91]), ("dwi.nii", vec![91, 109, 91, 2])];
        let mut req = PlotRequest {
            glass_brain: Some(PathBuf::from("mask.nii")),
            ..PlotRequest::default()
        };
        let report = preflight_with(&req, loader(&images)).unwrap();
        assert_eq!(report.slice_index, None);

        req.glass_brain = Some(PathBuf::from("dwi.nii"));
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::MaskNotThreeDimensional(_)));
    }

    #[test]
    fn test_tractography_files_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("af_left.trk");
        std::fs::write(&present, b"").unwrap();

        let overlay = TractographyOverlay::new(vec![present.clone()], None, None, None, 0.6, false)
            .unwrap();
        let mut req = PlotRequest {
            tractography: Some(overlay),
            ..PlotRequest::default()
        };
        let report = preflight_with(&req, loader(&[])).unwrap();
        assert_eq!(report.tractogram_count, 1);

        let missing = dir.path().join("cst.trk");
        req.tractography = Some(
            TractographyOverlay::new(vec![present, missing], None, None, None, 0.6, false)
                .unwrap(),
        );
        let err = preflight_with(&req, loader(&[])).unwrap_err();
        assert!(matches!(err, InspectError::FileNotFound(p) if p.ends_with("cst.trk")));
    }

    #[test]
    fn test_save_path_directory_must_exist() {
        let images = [("t1.nii", vec![10, 10, 10])];
        let mut req = request("t1.nii");

        req.save_path = Some(PathBuf::from("out.png"));
        assert!(preflight_with(&req, loader(&images)).is_ok());

        req.save_path = Some(PathBuf::from("/nonexistent/dir/out.png"));
        let err = preflight_with(&req, loader(&images)).unwrap_err();
        assert!(matches!(err, InspectError::OutputDirMissing(_)));
    }

    #[test]
    fn test_missing_image() {
        let req = request("absent.nii");
        let err = preflight_with(&req, loader(&[])).unwrap_err();
        assert!(matches!(err, InspectError::FileNotFound(_)));
    }
}
