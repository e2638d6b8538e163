// Device lifecycle - Acquisition of and access to the display surface
//
// The presentation core treats the display as a scoped resource: something
// that hands out a geometry description and a byte-addressable pixel
// buffer. Acquiring the real device can fail in several distinct ways,
// each of which is an unrecoverable startup error with its own process
// exit code.

pub mod geometry;
pub mod memory;

#[cfg(target_os = "linux")]
pub mod fbdev;

pub use geometry::{ChannelLayout, DeviceGeometry};
pub use memory::MemoryDevice;

#[cfg(target_os = "linux")]
pub use fbdev::FbdevDevice;

use std::io;

/// Byte-addressable pixel device the presenter writes into
///
/// Implementations own the backing storage; the core never allocates or
/// frees it. The buffer covers `geometry().buffer_len()` bytes.
pub trait PixelDevice {
    /// Geometry of the device, fixed for the session
    fn geometry(&self) -> &DeviceGeometry;

    /// Mutable view of the device's pixel buffer
    fn buffer_mut(&mut self) -> &mut [u8];
}

/// Errors that can occur while acquiring the display device
///
/// All of these are startup failures; there is no retry or degraded mode.
#[derive(Debug)]
pub enum DeviceError {
    /// Opening the device node failed
    Open(io::Error),

    /// Querying the fixed screen information failed
    FixedInfo(io::Error),

    /// Querying the variable screen information failed
    VariableInfo(io::Error),

    /// Mapping the device buffer into the process failed
    Map(io::Error),

    /// The device reports a pixel format the presenter cannot drive
    UnsupportedFormat { bits_per_pixel: u32 },
}

impl DeviceError {
    /// Process exit code reported for this failure site
    pub fn exit_code(&self) -> i32 {
        match self {
            DeviceError::Open(_) => 1,
            DeviceError::FixedInfo(_) => 2,
            DeviceError::VariableInfo(_) => 3,
            DeviceError::Map(_) => 4,
            DeviceError::UnsupportedFormat { .. } => 5,
        }
    }
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::Open(e) => write!(f, "could not open display device: {}", e),
            DeviceError::FixedInfo(e) => {
                write!(f, "error reading fixed screen information: {}", e)
            }
            DeviceError::VariableInfo(e) => {
                write!(f, "error reading variable screen information: {}", e)
            }
            DeviceError::Map(e) => {
                write!(f, "failed to map device buffer to memory: {}", e)
            }
            DeviceError::UnsupportedFormat { bits_per_pixel } => {
                write!(f, "unsupported pixel format: {} bits per pixel", bits_per_pixel)
            }
        }
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let not_found = || io::Error::from(io::ErrorKind::NotFound);
        let errors = [
            DeviceError::Open(not_found()),
            DeviceError::FixedInfo(not_found()),
            DeviceError::VariableInfo(not_found()),
            DeviceError::Map(not_found()),
            DeviceError::UnsupportedFormat { bits_per_pixel: 32 },
        ];

        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_messages_name_the_failure_site() {
        let err = DeviceError::UnsupportedFormat { bits_per_pixel: 24 };
        assert!(err.to_string().contains("24 bits per pixel"));
    }
}
