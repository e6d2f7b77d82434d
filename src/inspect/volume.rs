//! NIfTI header inspection
//!
//! Only the header is read; voxel data is left to the renderer. NIfTI-1
//! headers go through the `nifti` crate. NIfTI-2 headers are recognized by
//! their size field and only their `dim` array is decoded.

use crate::error::InspectError;
use byteordered::{ByteOrdered, Endianness};
use flate2::read::GzDecoder;
use nifti::NiftiHeader;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// `sizeof_hdr` of a NIfTI-2 header
const NIFTI2_HEADER_SIZE: i32 = 540;

/// Offset of the eight 64-bit `dim` entries in a NIfTI-2 header
const NIFTI2_DIM_OFFSET: usize = 16;

/// Bytes needed to read a NIfTI-2 `dim` array
const NIFTI2_PREFIX_LEN: usize = NIFTI2_DIM_OFFSET + 8 * 8;

/// Shape information read from a NIfTI-1 or NIfTI-2 header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeInfo {
    path: PathBuf,
    dims: Vec<usize>,
}

impl VolumeInfo {
    /// Create from known dimensions
    pub fn new(path: impl Into<PathBuf>, dims: Vec<usize>) -> Self {
        Self {
            path: path.into(),
            dims,
        }
    }

    /// Read the header of a `.nii` or `.nii.gz` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InspectError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(InspectError::FileNotFound(path.to_path_buf()));
        }

        let unreadable = |message: String| InspectError::Unreadable {
            path: path.to_path_buf(),
            message,
        };

        let prefix = read_prefix(path, NIFTI2_PREFIX_LEN).map_err(|e| unreadable(e.to_string()))?;
        let info = match nifti2_byte_order(&prefix) {
            Some(endianness) => {
                let dims = nifti2_dims(&prefix, endianness).map_err(unreadable)?;
                log::debug!("{} has a NIfTI-2 header", path.display());
                Self::new(path, dims)
            }
            None => {
                let header =
                    NiftiHeader::from_file(path).map_err(|e| unreadable(e.to_string()))?;
                Self::from_header(path, &header)
            }
        };

        log::debug!("Read header of {}: dims {:?}", path.display(), info.dims);
        Ok(info)
    }

    /// Extract the dimensions declared by a header
    pub fn from_header(path: impl Into<PathBuf>, header: &NiftiHeader) -> Self {
        let ndim = usize::from(header.dim[0]).clamp(1, 7);
        let dims = header.dim[1..=ndim].iter().map(|&d| usize::from(d)).collect();
        Self::new(path, dims)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The first three dimensions; missing ones count as 1
    pub fn spatial_shape(&self) -> [usize; 3] {
        [0, 1, 2].map(|i| self.dims.get(i).copied().unwrap_or(1))
    }

    /// Number of volumes stacked along the non-spatial dimensions
    pub fn volume_count(&self) -> usize {
        self.dims.iter().skip(3).product()
    }

    /// Whether the header declares more than three dimensions
    pub fn is_multi_volume(&self) -> bool {
        self.dims.len() > 3
    }
}

/// Read the first `len` bytes of a file, decompressing `.gz` files
fn read_prefix(path: &Path, len: usize) -> io::Result<Vec<u8>> {
    let file = BufReader::new(File::open(path)?);
    let mut prefix = Vec::with_capacity(len);
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).take(len as u64).read_to_end(&mut prefix)?;
    } else {
        file.take(len as u64).read_to_end(&mut prefix)?;
    }
    Ok(prefix)
}

/// Byte order of a NIfTI-2 header, or `None` if this is not one
fn nifti2_byte_order(prefix: &[u8]) -> Option<Endianness> {
    let size = prefix.get(..4)?;
    [Endianness::Little, Endianness::Big]
        .into_iter()
        .find(|&endianness| {
            ByteOrdered::runtime(size, endianness).read_i32().ok() == Some(NIFTI2_HEADER_SIZE)
        })
}

/// Decode the `dim` array of a NIfTI-2 header
fn nifti2_dims(prefix: &[u8], endianness: Endianness) -> Result<Vec<usize>, String> {
    let bytes = prefix
        .get(NIFTI2_DIM_OFFSET..NIFTI2_PREFIX_LEN)
        .ok_or_else(|| "truncated NIfTI-2 header".to_string())?;
    let mut reader = ByteOrdered::runtime(bytes, endianness);

    let mut dim = [0i64; 8];
    for d in &mut dim {
        *d = reader.read_i64().map_err(|e| e.to_string())?;
    }

    let ndim = usize::try_from(dim[0])
        .ok()
        .filter(|n| (1..=7).contains(n))
        .ok_or_else(|| format!("invalid NIfTI-2 dimension count {}", dim[0]))?;
    dim[1..=ndim]
        .iter()
        .map(|&d| usize::try_from(d).map_err(|_| format!("invalid NIfTI-2 dimension {}", d)))
        .collect()
}
