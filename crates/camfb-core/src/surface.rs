//! Geometry and pixel layout of a display surface, as reported by the device it belongs to.

/// Position and width of one color component inside a packed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Channel {
    pub offset: u32,
    pub length: u32,
}

impl Channel {
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// Scales an 8-bit component to the channel width and shifts it into place.
    #[inline]
    pub fn place(&self, value: u8) -> u32 {
        let value = value as u32;
        let scaled = if self.length <= 8 {
            value >> (8 - self.length)
        } else {
            value << (self.length - 8)
        };

        scaled << self.offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelLayout {
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
}

impl ChannelLayout {
    pub const XRGB8888: ChannelLayout = ChannelLayout {
        red: Channel::new(16, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(0, 8),
    };

    pub const RGB565: ChannelLayout = ChannelLayout {
        red: Channel::new(11, 5),
        green: Channel::new(5, 6),
        blue: Channel::new(0, 5),
    };

    #[inline]
    pub fn pack(&self, r: u8, g: u8, b: u8) -> u32 {
        self.red.place(r) | self.green.place(g) | self.blue.place(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelDepth {
    Bits16,
    Bits32,
}

impl PixelDepth {
    pub fn from_bits(bits_per_pixel: u32) -> Option<Self> {
        match bits_per_pixel {
            16 => Some(PixelDepth::Bits16),
            32 => Some(PixelDepth::Bits32),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            PixelDepth::Bits16 => 16,
            PixelDepth::Bits32 => 32,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bits() as usize / 8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    pub width: usize,
    pub height: usize,
    pub row_stride_bytes: usize,
    pub depth: PixelDepth,
    pub channel_layout: ChannelLayout,
}

impl SurfaceDescriptor {
    /// Tightly packed 32-bit XRGB surface.
    pub fn xrgb8888(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            row_stride_bytes: width * 4,
            depth: PixelDepth::Bits32,
            channel_layout: ChannelLayout::XRGB8888,
        }
    }

    /// Tightly packed 16-bit RGB565 surface.
    pub fn rgb565(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            row_stride_bytes: width * 2,
            depth: PixelDepth::Bits16,
            channel_layout: ChannelLayout::RGB565,
        }
    }

    pub fn with_row_stride(mut self, row_stride_bytes: usize) -> Self {
        self.row_stride_bytes = row_stride_bytes;
        self
    }

    pub fn min_row_stride(&self) -> usize {
        self.width * self.depth.bytes_per_pixel()
    }

    pub fn mapped_len(&self) -> usize {
        self.row_stride_bytes * self.height
    }
}

/// Destination of decoded pixels.
pub trait PixelSink {
    fn descriptor(&self) -> &SurfaceDescriptor;

    /// Stores a pixel already packed with the descriptor's channel layout.
    /// Coordinates are the caller's responsibility.
    fn put_pixel(&mut self, x: usize, y: usize, color: u32);
}
