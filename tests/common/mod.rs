use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Write a bare NIfTI-1 header (no voxel data) with the given dimensions
pub fn write_header(path: &Path, dims: &[u16]) {
    let mut hdr = vec![0u8; 352];
    hdr[0..4].copy_from_slice(&348i32.to_le_bytes());
    hdr[40..42].copy_from_slice(&(dims.len() as u16).to_le_bytes());
    for (i, d) in dims.iter().enumerate() {
        let at = 42 + i * 2;
        hdr[at..at + 2].copy_from_slice(&d.to_le_bytes());
    }
    hdr[70..72].copy_from_slice(&16i16.to_le_bytes());
    hdr[72..74].copy_from_slice(&32i16.to_le_bytes());
    hdr[108..112].copy_from_slice(&352f32.to_le_bytes());
    hdr[112..116].copy_from_slice(&1f32.to_le_bytes());
    hdr[344..348].copy_from_slice(b"n+1\0");
    std::fs::write(path, hdr).unwrap();
}

/// Write a bare little-endian NIfTI-2 header with the given dimensions
pub fn write_header2(path: &Path, dims: &[i64]) {
    let mut hdr = vec![0u8; 544];
    hdr[0..4].copy_from_slice(&540i32.to_le_bytes());
    hdr[4..12].copy_from_slice(b"n+2\0\r\n\x1a\n");
    hdr[12..14].copy_from_slice(&16i16.to_le_bytes());
    hdr[14..16].copy_from_slice(&32i16.to_le_bytes());
    hdr[16..24].copy_from_slice(&(dims.len() as i64).to_le_bytes());
    for (i, d) in dims.iter().enumerate() {
        let at = 24 + i * 8;
        hdr[at..at + 8].copy_from_slice(&d.to_le_bytes());
    }
    std::fs::write(path, hdr).unwrap();
}

/// Temporary working directory holding a 3D image `t1.nii`
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_header(&dir.path().join("t1.nii"), &[64, 80, 50]);
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run the binary inside the workspace with a clean environment
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_nifti2png"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("NIFTI2PNG_CONFIG")
            .env_remove("NIFTI2PNG_RENDERER")
            .env_remove("RUST_LOG")
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .output()
            .expect("run binary")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
