//! View domain types
//!
//! Slice selection, orientation, window size and camera placement.

use crate::error::DomainError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Anatomical plane the slice is taken in
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Horizontal plane (image axis 2)
    #[default]
    Axial,
    /// Left/right plane (image axis 0)
    Sagittal,
    /// Front/back plane (image axis 1)
    Coronal,
}

impl Orientation {
    /// Index of the image axis this orientation slices along
    pub const fn axis(&self) -> usize {
        match self {
            Orientation::Sagittal => 0,
            Orientation::Coronal => 1,
            Orientation::Axial => 2,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Orientation::Axial => "axial",
            Orientation::Sagittal => "sagittal",
            Orientation::Coronal => "coronal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voxel interpolation used by the slicer
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Nearest,
    Linear,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::Nearest => write!(f, "nearest"),
            Interpolation::Linear => write!(f, "linear"),
        }
    }
}

/// Which slice of the oriented axis to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceSelection {
    /// The middle slice (`"m"` on the command line)
    #[default]
    Middle,
    /// An explicit slice index
    Index(usize),
}

impl SliceSelection {
    /// Resolve against the length of the oriented axis
    ///
    /// Returns `None` when an explicit index is past the end of the axis.
    pub fn resolve(&self, axis_len: usize) -> Option<usize> {
        match *self {
            SliceSelection::Middle => Some(axis_len / 2),
            SliceSelection::Index(i) if i < axis_len => Some(i),
            SliceSelection::Index(_) => None,
        }
    }
}

impl FromStr for SliceSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("m") {
            return Ok(SliceSelection::Middle);
        }
        s.parse::<usize>()
            .map(SliceSelection::Index)
            .map_err(|_| DomainError::InvalidSlice(s.to_string()))
    }
}

impl fmt::Display for SliceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceSelection::Middle => write!(f, "m"),
            SliceSelection::Index(i) => write!(f, "{}", i),
        }
    }
}

impl Serialize for SliceSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            SliceSelection::Middle => serializer.serialize_str("m"),
            SliceSelection::Index(i) => serializer.serialize_u64(i as u64),
        }
    }
}

/// Render window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    /// Create a validated window size
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidWindowSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Build from the two values of `--size`
    pub fn from_values(values: &[u32]) -> Result<Self, DomainError> {
        match values {
            [width, height] => Self::new(*width, *height),
            _ => Err(DomainError::WrongArity {
                flag: "size",
                expected: 2,
                found: values.len(),
            }),
        }
    }

    /// As a `(width, height)` pair
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Camera angles in degrees; unset angles keep the renderer's default view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CameraAngles {
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
}

impl CameraAngles {
    pub fn new(azimuth: Option<f64>, elevation: Option<f64>) -> Result<Self, DomainError> {
        for (name, angle) in [("azimuth", azimuth), ("elevation", elevation)] {
            if let Some(a) = angle {
                if !a.is_finite() {
                    return Err(DomainError::InvalidValue(format!("{} must be finite", name)));
                }
            }
        }
        Ok(Self { azimuth, elevation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_from_str() {
        assert_eq!("m".parse::<SliceSelection>(), Ok(SliceSelection::Middle));
        assert_eq!("M".parse::<SliceSelection>(), Ok(SliceSelection::Middle));
        assert_eq!("42".parse::<SliceSelection>(), Ok(SliceSelection::Index(42)));
        assert!("-1".parse::<SliceSelection>().is_err());
        assert!("middle".parse::<SliceSelection>().is_err());
    }

    #[test]
    fn test_slice_resolve() {
        assert_eq!(SliceSelection::Middle.resolve(181), Some(90));
        assert_eq!(SliceSelection::Middle.resolve(256), Some(128));
        assert_eq!(SliceSelection::Index(10).resolve(11), Some(10));
        assert_eq!(SliceSelection::Index(11).resolve(11), None);
    }

    #[test]
    fn test_slice_serialization() {
        assert_eq!(serde_json::to_string(&SliceSelection::Middle).unwrap(), "\"m\"");
        assert_eq!(serde_json::to_string(&SliceSelection::Index(7)).unwrap(), "7");
    }

    #[test]
    fn test_orientation_axis() {
        assert_eq!(Orientation::Sagittal.axis(), 0);
        assert_eq!(Orientation::Coronal.axis(), 1);
        assert_eq!(Orientation::Axial.axis(), 2);
        assert_eq!(Orientation::default(), Orientation::Axial);
    }

    #[test]
    fn test_window_size_validation() {
        assert_eq!(WindowSize::from_values(&[800, 500]).unwrap().as_tuple(), (800, 500));
        assert!(WindowSize::from_values(&[800]).is_err());
        assert!(WindowSize::from_values(&[800, 500, 1, 1]).is_err());
        assert!(WindowSize::new(0, 400).is_err());
        assert_eq!(WindowSize::default().to_string(), "600x400");
    }

    #[test]
    fn test_camera_angles() {
        let camera = CameraAngles::new(Some(-45.0), None).unwrap();
        assert_eq!(camera.azimuth, Some(-45.0));
        assert_eq!(camera.elevation, None);
        assert!(CameraAngles::new(None, Some(f64::NAN)).is_err());
    }
}
