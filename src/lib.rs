// retrofb - Palette-indexed frame presentation for framebuffer displays
//
// Takes a 320x200 palette-indexed software-rendered frame and displays it
// on a pixel-addressable device whose color format and resolution differ
// from the logical render surface.

// Public modules
pub mod device;
pub mod display;
pub mod hooks;
pub mod session;

// Re-export main types for convenience
pub use device::{ChannelLayout, DeviceError, DeviceGeometry, MemoryDevice, PixelDevice};

#[cfg(target_os = "linux")]
pub use device::FbdevDevice;

pub use display::{
    AddressCalculator, DeviceColor, GammaLevel, GammaTable, PaletteEntry, PaletteTable,
    PixelLayout, Presenter, Surface, PALETTE_SIZE, SURFACE_HEIGHT, SURFACE_SIZE, SURFACE_WIDTH,
};
pub use hooks::{EventPump, FrameHooks, GrabMouseCallback, NullEventPump};
pub use session::{
    PresentationConfig, PresentationSession, ScreenshotError, Snapshot, SnapshotError,
};
