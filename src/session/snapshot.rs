// Snapshot functionality
//
// Serializes the logical frame and the active palette so a diagnostic
// session or save state can restore the exact presentation input later.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::palette::{PaletteEntry, PaletteTable, PALETTE_SIZE};
use crate::display::surface::{Surface, SURFACE_HEIGHT, SURFACE_SIZE, SURFACE_WIDTH};

/// Errors that can occur during snapshot operations
#[derive(Debug)]
pub enum SnapshotError {
    /// I/O error
    Io(io::Error),

    /// Serialization/deserialization error
    Serialization(serde_json::Error),

    /// Snapshot version mismatch
    VersionMismatch { expected: u32, found: u32 },

    /// Snapshot was captured at a different logical resolution
    ResolutionMismatch { width: usize, height: usize },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {}", e),
            SnapshotError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(f, "Version mismatch: expected {}, found {}", expected, found)
            }
            SnapshotError::ResolutionMismatch { width, height } => {
                write!(
                    f,
                    "Resolution mismatch: snapshot is {}x{}, surface is {}x{}",
                    width, height, SURFACE_WIDTH, SURFACE_HEIGHT
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Serialization(e)
    }
}

/// Current snapshot format version
const SNAPSHOT_VERSION: u32 = 1;

/// Captured presentation input state
///
/// Contains the palette and the logical frame exactly as they were at
/// capture time; applying it reproduces the same presented image.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Version number for compatibility checking
    version: u32,

    /// Timestamp when the snapshot was created
    timestamp: String,

    /// Logical surface width at capture time
    width: usize,

    /// Logical surface height at capture time
    height: usize,

    /// Stored palette entries (gamma already applied)
    palette: Vec<PaletteEntry>,

    /// Surface contents as palette indices
    indices: Vec<u8>,
}

impl Snapshot {
    /// Capture the current surface and palette
    pub fn capture(surface: &Surface, palette: &PaletteTable) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            palette: palette.entries().to_vec(),
            indices: surface.as_slice().to_vec(),
        }
    }

    /// Restore the captured state into a surface and palette table
    pub fn apply(
        &self,
        surface: &mut Surface,
        palette: &mut PaletteTable,
    ) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }
        if self.width != SURFACE_WIDTH
            || self.height != SURFACE_HEIGHT
            || self.indices.len() != SURFACE_SIZE
            || self.palette.len() != PALETTE_SIZE
        {
            return Err(SnapshotError::ResolutionMismatch {
                width: self.width,
                height: self.height,
            });
        }

        surface.as_mut_slice().copy_from_slice(&self.indices);
        palette.restore(&self.palette);
        Ok(())
    }
}

/// Save a snapshot of the current presentation input
///
/// # Arguments
///
/// * `surface` - The logical frame to capture
/// * `palette` - The active palette table
/// * `dir` - Directory to write the snapshot into (created if missing)
///
/// # Returns
///
/// Result containing the path to the saved snapshot or an error
pub fn save_snapshot(
    surface: &Surface,
    palette: &PaletteTable,
    dir: &Path,
) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("snapshot_{}.json", timestamp);
    let file_path = dir.join(filename);

    let snapshot = Snapshot::capture(surface, palette);
    let contents = serde_json::to_string(&snapshot)?;
    fs::write(&file_path, contents)?;

    Ok(file_path)
}

/// Load a snapshot from a file
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let contents = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&contents)?;
    Ok(snapshot)
}
