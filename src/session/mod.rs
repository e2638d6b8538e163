// Presentation session - Owns the device, surface, and palette state
//
// Explicit context object: everything the presentation layer needs lives
// here and is passed around by the owning subsystem. Construction
// acquires the display device; dropping the session releases it.

pub mod config;
pub mod screenshot;
pub mod snapshot;

pub use config::PresentationConfig;
pub use screenshot::ScreenshotError;
pub use snapshot::{Snapshot, SnapshotError};

use std::path::{Path, PathBuf};
use std::process;

use crate::device::{DeviceError, DeviceGeometry, PixelDevice};
use crate::display::color::{DeviceColor, PixelLayout};
use crate::display::palette::{GammaLevel, GammaTable, PaletteTable, PALETTE_SIZE};
use crate::display::presenter::Presenter;
use crate::display::surface::Surface;
use crate::hooks::FrameHooks;

#[cfg(target_os = "linux")]
use crate::device::FbdevDevice;
#[cfg(not(target_os = "linux"))]
use crate::device::MemoryDevice;

/// Presentation context for one full-screen session
///
/// Holds the acquired device, the logical surface, the palette table,
/// and the cached device-color table derived from it.
pub struct PresentationSession {
    device: Box<dyn PixelDevice>,
    surface: Surface,
    palette: PaletteTable,
    device_palette: [DeviceColor; PALETTE_SIZE],
    layout: PixelLayout,
    presenter: Presenter,
    gamma: GammaTable,
    gamma_level: GammaLevel,
    hooks: FrameHooks,
    screensaver_mode: bool,
    screen_visible: bool,
}

impl PresentationSession {
    /// Acquire the configured device and build a session, or exit
    ///
    /// Acquisition failures are unrecoverable startup errors: the failure
    /// is reported and the process exits with that failure site's code.
    pub fn initialize(config: &PresentationConfig) -> Self {
        match Self::try_initialize(config) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("retrofb: {}", err);
                process::exit(err.exit_code());
            }
        }
    }

    /// Fallible equivalent of `initialize`
    #[cfg(target_os = "linux")]
    pub fn try_initialize(config: &PresentationConfig) -> Result<Self, DeviceError> {
        let device = FbdevDevice::open(&config.device.path)?;
        {
            let g = device.geometry();
            println!(
                "retrofb: opened {}: {}x{} (virtual {}x{}), {} bpp, stride {} bytes",
                config.device.path.display(),
                g.width,
                g.height,
                g.virtual_width,
                g.virtual_height,
                g.bits_per_pixel,
                g.line_stride
            );
        }
        Self::with_device(Box::new(device), GammaLevel::clamped(config.video.gamma))
    }

    /// Fallible equivalent of `initialize`
    ///
    /// There is no framebuffer device off Linux; headless runs present
    /// into an in-memory target so the pipeline still works end to end.
    #[cfg(not(target_os = "linux"))]
    pub fn try_initialize(config: &PresentationConfig) -> Result<Self, DeviceError> {
        let device = MemoryDevice::rgb565(640, 480);
        Self::with_device(Box::new(device), GammaLevel::clamped(config.video.gamma))
    }

    /// Build a session around an already-acquired device
    ///
    /// Validates that the device drives a 16-bit pixel format and clears
    /// its buffer once so letterbox borders start out black.
    pub fn with_device(
        device: Box<dyn PixelDevice>,
        gamma_level: GammaLevel,
    ) -> Result<Self, DeviceError> {
        let geometry = device.geometry();
        assert!(geometry.validate(), "device reported inconsistent geometry");
        if geometry.bits_per_pixel != 16 {
            return Err(DeviceError::UnsupportedFormat {
                bits_per_pixel: geometry.bits_per_pixel,
            });
        }

        let layout = PixelLayout::from_geometry(geometry);
        let presenter = Presenter::new(geometry);

        let mut session = Self {
            device,
            surface: Surface::new(),
            palette: PaletteTable::new(),
            device_palette: [0; PALETTE_SIZE],
            layout,
            presenter,
            gamma: GammaTable::build(gamma_level),
            gamma_level,
            hooks: FrameHooks::new(),
            screensaver_mode: false,
            screen_visible: true,
        };
        session.device.buffer_mut().fill(0);
        Ok(session)
    }

    /// Replace all 256 palette entries
    ///
    /// Applies the active gamma table to every channel and rebuilds the
    /// cached device-color table. Typically called on a level change or
    /// fade transition, not per frame.
    pub fn set_palette(&mut self, raw: &[[u8; 3]; PALETTE_SIZE]) {
        self.palette.set_palette(raw, &self.gamma);
        self.rebuild_device_palette();
    }

    /// Switch the gamma correction level
    ///
    /// Takes effect at the next `set_palette`; already stored entries are
    /// not re-corrected.
    pub fn set_gamma_level(&mut self, level: GammaLevel) {
        if level != self.gamma_level {
            self.gamma_level = level;
            self.gamma = GammaTable::build(level);
        }
    }

    fn rebuild_device_palette(&mut self) {
        for (slot, entry) in self
            .device_palette
            .iter_mut()
            .zip(self.palette.entries().iter())
        {
            *slot = self.layout.pack_entry(*entry);
        }
    }

    /// Present the current surface onto the device
    ///
    /// Called once per displayed frame. Does nothing while the screen is
    /// not visible.
    pub fn present(&mut self) {
        if !self.screen_visible {
            return;
        }
        self.presenter
            .present(&self.surface, &self.device_palette, self.device.buffer_mut());
    }

    /// Copy the surface verbatim into `dest`
    ///
    /// Diagnostic/save-state path; see [`Surface::read_back`].
    pub fn read_back(&self, dest: &mut [u8]) {
        self.surface.read_back(dest);
    }

    /// Save a PNG of the current logical frame through the active palette
    pub fn capture_screenshot(
        &self,
        dir: &Path,
        include_timestamp: bool,
    ) -> Result<PathBuf, ScreenshotError> {
        screenshot::save_screenshot(
            self.surface.as_slice(),
            self.palette.entries(),
            dir,
            include_timestamp,
        )
    }

    /// Save a restorable snapshot of the surface and palette
    pub fn capture_snapshot(&self, dir: &Path) -> Result<PathBuf, SnapshotError> {
        snapshot::save_snapshot(&self.surface, &self.palette, dir)
    }

    /// Restore a previously captured snapshot
    pub fn restore_snapshot(&mut self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = snapshot::load_snapshot(path)?;
        snapshot.apply(&mut self.surface, &mut self.palette)?;
        self.rebuild_device_palette();
        Ok(())
    }

    /// The logical surface the rendering subsystem draws into
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutable access to the logical surface
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// The active palette table
    pub fn palette(&self) -> &PaletteTable {
        &self.palette
    }

    /// Geometry of the acquired device
    pub fn geometry(&self) -> &DeviceGeometry {
        self.device.geometry()
    }

    /// The engine-facing hook surface
    pub fn hooks(&self) -> &FrameHooks {
        &self.hooks
    }

    /// Mutable access to the hook surface
    pub fn hooks_mut(&mut self) -> &mut FrameHooks {
        &mut self.hooks
    }

    /// Whether the process runs as a screensaver
    pub fn screensaver_mode(&self) -> bool {
        self.screensaver_mode
    }

    pub fn set_screensaver_mode(&mut self, enabled: bool) {
        self.screensaver_mode = enabled;
    }

    /// Whether frames are currently presented
    pub fn screen_visible(&self) -> bool {
        self.screen_visible
    }

    pub fn set_screen_visible(&mut self, visible: bool) {
        self.screen_visible = visible;
    }

    /// End the session, releasing the surface and the device mapping
    ///
    /// Consumes the session, so it can only happen once.
    pub fn shutdown(self) {}
}
