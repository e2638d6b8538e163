// Device geometry - Immutable description of the physical display surface
//
// Captured once at session start from the device: resolution, virtual
// resolution, pixel format layout, line stride, and panning offsets.
// The presentation core only ever reads these fields.

/// Bit placement of one color channel inside a device pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLayout {
    /// Bit offset of the channel's least significant bit
    pub offset: u32,

    /// Channel width in bits
    pub length: u32,
}

/// Geometry and pixel format of the display device
///
/// Built by the device acquisition layer and held unchanged for the
/// lifetime of the session.
#[derive(Debug, Clone)]
pub struct DeviceGeometry {
    /// Visible horizontal resolution in pixels
    pub width: u32,

    /// Visible vertical resolution in pixels
    pub height: u32,

    /// Virtual horizontal resolution (>= width)
    pub virtual_width: u32,

    /// Virtual vertical resolution (>= height)
    pub virtual_height: u32,

    /// Bits per device pixel
    pub bits_per_pixel: u32,

    /// Length of one scanline in bytes; may exceed `width * bytes_per_pixel`
    /// when the device pads rows
    pub line_stride: usize,

    /// Horizontal pixel panning offset
    pub x_pan: u32,

    /// Vertical pixel panning offset
    pub y_pan: u32,

    /// Red channel placement
    pub red: ChannelLayout,

    /// Green channel placement
    pub green: ChannelLayout,

    /// Blue channel placement
    pub blue: ChannelLayout,

    /// Alpha channel placement (length 0 when the device has no alpha)
    pub alpha: ChannelLayout,
}

impl DeviceGeometry {
    /// Standard RGB565 geometry with a tightly packed stride and no panning
    ///
    /// This is the common case for 16-bit framebuffer devices and the
    /// geometry used by in-memory devices.
    pub fn rgb565(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            virtual_width: width,
            virtual_height: height,
            bits_per_pixel: 16,
            line_stride: width as usize * 2,
            x_pan: 0,
            y_pan: 0,
            red: ChannelLayout {
                offset: 11,
                length: 5,
            },
            green: ChannelLayout {
                offset: 5,
                length: 6,
            },
            blue: ChannelLayout {
                offset: 0,
                length: 5,
            },
            alpha: ChannelLayout {
                offset: 0,
                length: 0,
            },
        }
    }

    /// Bytes per device pixel
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    /// Size in bytes of the device buffer this geometry describes
    ///
    /// Rows are stride-sized, so padded scanlines are fully covered.
    pub fn buffer_len(&self) -> usize {
        self.line_stride * self.virtual_height as usize
    }

    /// Check the geometry's internal invariants
    ///
    /// A well-formed device reports a non-zero visible resolution, a
    /// virtual resolution at least as large, and a line stride that can
    /// hold one visible row of pixels.
    pub fn validate(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.virtual_width >= self.width
            && self.virtual_height >= self.height
            && self.bits_per_pixel % 8 == 0
            && self.line_stride >= self.width as usize * self.bytes_per_pixel()
    }
}
