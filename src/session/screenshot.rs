// Screenshot functionality
//
// Captures the logical frame through the active palette and saves it as
// a PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::palette::{PaletteEntry, PALETTE_SIZE};
use crate::display::surface::{SURFACE_HEIGHT, SURFACE_WIDTH};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a screenshot of the current frame
///
/// Resolves each palette index through the stored (already
/// gamma-corrected) palette entries and writes the result as RGB888.
///
/// # Arguments
///
/// * `indices` - The logical frame (320x200 palette indices)
/// * `palette` - The active palette entries
/// * `dir` - Directory to write the screenshot into (created if missing)
/// * `include_timestamp` - Timestamp the filename, or overwrite a fixed one
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
pub fn save_screenshot(
    indices: &[u8],
    palette: &[PaletteEntry; PALETTE_SIZE],
    dir: &Path,
    include_timestamp: bool,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(dir)?;

    let filename = if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("screenshot_{}.png", timestamp)
    } else {
        String::from("screenshot.png")
    };
    let file_path = dir.join(filename);

    let rgb_data = indices_to_rgb(indices, palette);
    save_png(
        &file_path,
        &rgb_data,
        SURFACE_WIDTH as u32,
        SURFACE_HEIGHT as u32,
    )?;

    Ok(file_path)
}

/// Convert palette indices to RGB data
///
/// # Arguments
///
/// * `indices` - Frame buffer with palette indices
/// * `palette` - Palette entries to resolve the indices through
///
/// # Returns
///
/// RGB data (3 bytes per input pixel)
fn indices_to_rgb(indices: &[u8], palette: &[PaletteEntry; PALETTE_SIZE]) -> Vec<u8> {
    let mut rgb_data = Vec::with_capacity(indices.len() * 3);

    for &index in indices {
        let entry = palette[index as usize];
        rgb_data.push(entry.r);
        rgb_data.push(entry.g);
        rgb_data.push(entry.b);
    }

    rgb_data
}

/// Save RGB data as a PNG file
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_to_rgb() {
        let mut palette = [PaletteEntry::default(); PALETTE_SIZE];
        palette[1] = PaletteEntry { r: 10, g: 20, b: 30 };
        palette[2] = PaletteEntry {
            r: 40,
            g: 50,
            b: 60,
        };

        let indices = [1u8, 2, 0];
        let rgb = indices_to_rgb(&indices, &palette);

        assert_eq!(rgb, vec![10, 20, 30, 40, 50, 60, 0, 0, 0]);
    }

    #[test]
    fn test_indices_to_rgb_length() {
        let palette = [PaletteEntry::default(); PALETTE_SIZE];
        let indices = vec![0u8; 320 * 200];
        let rgb = indices_to_rgb(&indices, &palette);
        assert_eq!(rgb.len(), 320 * 200 * 3);
    }
}
