// Presenter - Scales the logical surface onto the device buffer
//
// One uniform scale factor (the smaller of the two axis ratios) keeps the
// image isotropic and uncropped; centering offsets letterbox or pillarbox
// the remainder. Scaling is nearest-neighbor with selective duplication:
// when a mapped coordinate overflows its integer cell by half a pixel or
// more, the color is also written into the next column and/or row. Border
// pixels outside the image are never touched here; the session clears the
// buffer once at startup instead.

use crate::device::DeviceGeometry;
use crate::display::address::AddressCalculator;
use crate::display::color::DeviceColor;
use crate::display::palette::PALETTE_SIZE;
use crate::display::surface::{Surface, SURFACE_HEIGHT, SURFACE_WIDTH};

/// Per-session scaling and addressing state for frame presentation
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    scale: f32,
    x_offset: f32,
    y_offset: f32,
    device_width: i32,
    device_height: i32,
    address: AddressCalculator,
}

impl Presenter {
    /// Precompute the scale factor and centering offsets for a device
    pub fn new(geometry: &DeviceGeometry) -> Self {
        let x_scale = geometry.width as f32 / SURFACE_WIDTH as f32;
        let y_scale = geometry.height as f32 / SURFACE_HEIGHT as f32;
        let scale = x_scale.min(y_scale);

        let x_offset = (geometry.width as f32 - SURFACE_WIDTH as f32 * scale) / 2.0;
        let y_offset = (geometry.height as f32 - SURFACE_HEIGHT as f32 * scale) / 2.0;

        Self {
            scale,
            x_offset,
            y_offset,
            device_width: geometry.width as i32,
            device_height: geometry.height as i32,
            address: AddressCalculator::new(geometry),
        }
    }

    /// The uniform scale factor applied to both axes
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Horizontal centering offset in device pixels
    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    /// Vertical centering offset in device pixels
    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }

    /// Write one frame into the device buffer
    ///
    /// Reads every surface pixel, converts it through the device color
    /// table, and stores it at its mapped device coordinate, duplicating
    /// into the neighboring column/row where the fractional mapping
    /// demands it. Duplicated writes are clamped to the visible
    /// resolution so the bottom and right image edges can never run past
    /// the device buffer.
    pub fn present(
        &self,
        surface: &Surface,
        device_palette: &[DeviceColor; PALETTE_SIZE],
        buffer: &mut [u8],
    ) {
        let pixels = surface.as_slice();

        for gy in 0..SURFACE_HEIGHT {
            let fy = gy as f32 * self.scale + self.y_offset;
            let by = fy as i32;
            let extend_down = fy - by as f32 >= 0.5;
            let row = &pixels[gy * SURFACE_WIDTH..(gy + 1) * SURFACE_WIDTH];

            for (gx, &index) in row.iter().enumerate() {
                let fx = gx as f32 * self.scale + self.x_offset;
                let bx = fx as i32;
                let extend_right = fx - bx as f32 >= 0.5;

                // Rounding at the image edge can land just outside the
                // device; such pixels are dropped.
                if bx < 0 || bx >= self.device_width || by < 0 || by >= self.device_height {
                    continue;
                }

                let color = device_palette[index as usize];
                self.store(buffer, bx as usize, by as usize, color);

                let room_right = bx + 1 < self.device_width;
                let room_down = by + 1 < self.device_height;

                if extend_down && room_down {
                    self.store(buffer, bx as usize, by as usize + 1, color);
                }
                if extend_right && room_right {
                    self.store(buffer, bx as usize + 1, by as usize, color);
                }
                if extend_down && extend_right && room_down && room_right {
                    self.store(buffer, bx as usize + 1, by as usize + 1, color);
                }
            }
        }
    }

    #[inline]
    fn store(&self, buffer: &mut [u8], x: usize, y: usize, color: DeviceColor) {
        let offset = self.address.offset(x, y);
        buffer[offset..offset + 2].copy_from_slice(&color.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{MemoryDevice, PixelDevice};

    /// Device palette where entry i maps to a recognizable non-zero value
    fn marker_palette() -> [DeviceColor; PALETTE_SIZE] {
        let mut palette = [0u16; PALETTE_SIZE];
        for (i, slot) in palette.iter_mut().enumerate() {
            *slot = 0xFF00 | i as u16;
        }
        palette
    }

    #[test]
    fn test_scale_is_min_axis_ratio() {
        let presenter = Presenter::new(&DeviceGeometry::rgb565(640, 480));
        assert_eq!(presenter.scale(), 2.0);
        assert_eq!(presenter.x_offset(), 0.0);
        assert_eq!(presenter.y_offset(), 40.0);

        let presenter = Presenter::new(&DeviceGeometry::rgb565(800, 600));
        assert_eq!(presenter.scale(), 2.5);
        assert_eq!(presenter.x_offset(), 0.0);
        assert_eq!(presenter.y_offset(), 50.0);
    }

    #[test]
    fn test_portrait_device_letterboxes_vertically() {
        let presenter = Presenter::new(&DeviceGeometry::rgb565(480, 640));
        assert_eq!(presenter.scale(), 1.5);
        assert_eq!(presenter.x_offset(), 0.0);
        assert_eq!(presenter.y_offset(), 170.0);
    }

    #[test]
    fn test_offsets_are_never_negative() {
        for (w, h) in [(320, 200), (640, 480), (480, 640), (1920, 1080), (160, 100)] {
            let presenter = Presenter::new(&DeviceGeometry::rgb565(w, h));
            assert!(presenter.x_offset() >= 0.0);
            assert!(presenter.y_offset() >= 0.0);
        }
    }

    #[test]
    fn test_upscale_centers_and_leaves_borders_untouched() {
        let mut device = MemoryDevice::rgb565(640, 480);
        let presenter = Presenter::new(device.geometry());
        let surface = Surface::new();

        presenter.present(&surface, &marker_palette(), device.buffer_mut());

        // First image row lands at the centering offset.
        assert_eq!(device.pixel_at(0, 40), 0xFF00);
        assert_eq!(device.pixel_at(638, 40), 0xFF00);
        // Letterbox bars above and below stay untouched.
        assert_eq!(device.pixel_at(0, 39), 0x0000);
        assert_eq!(device.pixel_at(0, 479), 0x0000);
        assert_eq!(device.pixel_at(639, 0), 0x0000);
    }

    #[test]
    fn test_half_pixel_overflow_duplicates_into_2x2_block() {
        let mut device = MemoryDevice::rgb565(480, 300);
        let presenter = Presenter::new(device.geometry());
        assert_eq!(presenter.scale(), 1.5);

        let mut surface = Surface::new();
        surface.set_pixel(1, 1, 5);

        let mut palette = [0x1111u16; PALETTE_SIZE];
        palette[5] = 0xABCD;
        presenter.present(&surface, &palette, device.buffer_mut());

        // Logical (1, 1) maps to 1.5 on both axes: half-pixel overflow
        // duplicates it right, down, and diagonally.
        assert_eq!(device.pixel_at(1, 1), 0xABCD);
        assert_eq!(device.pixel_at(2, 1), 0xABCD);
        assert_eq!(device.pixel_at(1, 2), 0xABCD);
        assert_eq!(device.pixel_at(2, 2), 0xABCD);
        // The neighbor with a whole-number mapping is written once.
        assert_eq!(device.pixel_at(3, 1), 0x1111);
        assert_eq!(device.pixel_at(0, 0), 0x1111);
    }

    #[test]
    fn test_last_pixel_maps_inside_device_with_duplication() {
        let mut device = MemoryDevice::rgb565(480, 640);
        let presenter = Presenter::new(device.geometry());

        let mut surface = Surface::new();
        surface.set_pixel(0, 0, 1);
        surface.set_pixel(319, 199, 2);

        let mut palette = [0u16; PALETTE_SIZE];
        palette[1] = 0xAAAA;
        palette[2] = 0xBBBB;
        presenter.present(&surface, &palette, device.buffer_mut());

        assert_eq!(device.pixel_at(0, 170), 0xAAAA);
        // (319, 199) maps to (478.5, 468.5): written plus all three
        // duplicates, all inside the device.
        assert_eq!(device.pixel_at(478, 468), 0xBBBB);
        assert_eq!(device.pixel_at(479, 468), 0xBBBB);
        assert_eq!(device.pixel_at(478, 469), 0xBBBB);
        assert_eq!(device.pixel_at(479, 469), 0xBBBB);
    }

    #[test]
    fn test_downscale_does_not_overrun_device_edges() {
        // At scale 0.5 the last column maps to 159.5 and the last row to
        // 99.5: both extension flags fire exactly at the device edge and
        // must be dropped rather than written past the buffer.
        let mut device = MemoryDevice::rgb565(160, 100);
        let presenter = Presenter::new(device.geometry());

        let mut surface = Surface::new();
        surface.clear(7);

        let mut palette = [0u16; PALETTE_SIZE];
        palette[7] = 0x7777;
        presenter.present(&surface, &palette, device.buffer_mut());

        assert_eq!(device.pixel_at(159, 99), 0x7777);
        assert_eq!(device.pixel_at(0, 0), 0x7777);
    }

    #[test]
    fn test_present_reads_surface_without_mutating() {
        let mut device = MemoryDevice::rgb565(640, 480);
        let presenter = Presenter::new(device.geometry());

        let mut surface = Surface::new();
        surface.test_pattern();
        let before: Vec<u8> = surface.as_slice().to_vec();

        presenter.present(&surface, &marker_palette(), device.buffer_mut());
        assert_eq!(surface.as_slice(), before.as_slice());
    }

    #[test]
    fn test_identical_frames_produce_identical_buffers() {
        let mut first = MemoryDevice::rgb565(480, 300);
        let mut second = MemoryDevice::rgb565(480, 300);
        let presenter = Presenter::new(first.geometry());

        let mut surface = Surface::new();
        surface.gradient_pattern();
        let palette = marker_palette();

        presenter.present(&surface, &palette, first.buffer_mut());
        presenter.present(&surface, &palette, second.buffer_mut());
        assert_eq!(first.buffer(), second.buffer());
    }
}
