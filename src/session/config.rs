// Configuration management
//
// Handles presentation configuration and settings persistence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default configuration file path
const CONFIG_FILE: &str = "retrofb.toml";

/// Presentation configuration
///
/// Stores all user-configurable settings for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Display device settings
    pub device: DeviceConfig,

    /// Video settings
    pub video: VideoConfig,

    /// Capture settings
    pub capture: CaptureConfig,
}

/// Display device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Framebuffer device node to open
    pub path: PathBuf,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Gamma correction level (0-4, 0 = off)
    pub gamma: u8,
}

/// Capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Screenshot directory
    pub screenshot_directory: PathBuf,

    /// Snapshot directory
    pub snapshot_directory: PathBuf,

    /// Include timestamp in capture filenames
    pub include_timestamp: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        PresentationConfig {
            device: DeviceConfig {
                path: PathBuf::from("/dev/fb0"),
            },
            video: VideoConfig { gamma: 0 },
            capture: CaptureConfig {
                screenshot_directory: PathBuf::from("screenshots"),
                snapshot_directory: PathBuf::from("snapshots"),
                include_timestamp: true,
            },
        }
    }
}

impl PresentationConfig {
    /// Load configuration from file or create default
    ///
    /// If the configuration file doesn't exist, creates a default
    /// configuration and saves it to the file.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| {
            let config = Self::default();
            // Try to save the default config, but don't fail if we can't
            let _ = config.save();
            config
        })
    }

    /// Load configuration from file
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}
