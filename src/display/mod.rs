// Display module - The indexed-to-truecolor presentation pipeline
//
// This module provides:
// - Logical surface (320x200 palette indices)
// - Palette table with gamma correction (256 entries)
// - Device color packing (16-bit truecolor, 565 in the common case)
// - Device buffer addressing (stride and panning aware)
// - Frame presentation with aspect-preserving nearest-neighbor scaling

pub mod address;
pub mod color;
pub mod palette;
pub mod presenter;
pub mod surface;

pub use address::AddressCalculator;
pub use color::{DeviceColor, PixelLayout};
pub use palette::{GammaLevel, GammaTable, PaletteEntry, PaletteTable, PALETTE_SIZE};
pub use presenter::Presenter;
pub use surface::{Surface, SURFACE_HEIGHT, SURFACE_SIZE, SURFACE_WIDTH};
