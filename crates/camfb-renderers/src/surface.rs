use std::ops::{Deref, DerefMut};

use camfb_core::surface::{PixelDepth, PixelSink, SurfaceDescriptor};

use crate::error::SurfaceError;

/// Pixel addressing over a mapped display memory region.
///
/// A pixel lives at `y * row_stride_bytes + x * bytes_per_pixel` and is stored
/// as a single native-endian unit. The surface is the only writer of `memory`.
pub struct Surface<M> {
    descriptor: SurfaceDescriptor,
    memory: M,
}

impl<M> Surface<M>
where
    M: Deref<Target = [u8]> + DerefMut,
{
    pub fn new(descriptor: SurfaceDescriptor, memory: M) -> Result<Self, SurfaceError> {
        if descriptor.row_stride_bytes < descriptor.min_row_stride() {
            return Err(SurfaceError::InvalidStride {
                row_stride_bytes: descriptor.row_stride_bytes,
                min_row_stride: descriptor.min_row_stride(),
            });
        }

        if memory.len() < descriptor.mapped_len() {
            return Err(SurfaceError::RegionTooSmall {
                expected: descriptor.mapped_len(),
                actual: memory.len(),
            });
        }

        Ok(Self { descriptor, memory })
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.descriptor.row_stride_bytes + x * self.descriptor.depth.bytes_per_pixel()
    }

    /// Writes `color`, already packed for this surface's layout, at `(x, y)`.
    /// Coordinates are not validated against the logical width.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: u32) {
        let offset = self.offset(x, y);

        match self.descriptor.depth {
            PixelDepth::Bits32 => {
                self.memory[offset..offset + 4].copy_from_slice(&color.to_ne_bytes())
            }
            PixelDepth::Bits16 => {
                self.memory[offset..offset + 2].copy_from_slice(&(color as u16).to_ne_bytes())
            }
        }
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> u32 {
        let offset = self.offset(x, y);

        match self.descriptor.depth {
            PixelDepth::Bits32 => {
                let mut bytes = [0; 4];
                bytes.copy_from_slice(&self.memory[offset..offset + 4]);
                u32::from_ne_bytes(bytes)
            }
            PixelDepth::Bits16 => {
                let mut bytes = [0; 2];
                bytes.copy_from_slice(&self.memory[offset..offset + 2]);
                u16::from_ne_bytes(bytes) as u32
            }
        }
    }

    /// Fills a rectangle one pixel at a time, clipped to the surface.
    pub fn rect_fill(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x_end = x.saturating_add(w).min(self.descriptor.width);
        let y_end = y.saturating_add(h).min(self.descriptor.height);

        for j in y..y_end {
            for i in x..x_end {
                self.put_pixel(i, j, color);
            }
        }
    }

    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }
}

impl<M> PixelSink for Surface<M>
where
    M: Deref<Target = [u8]> + DerefMut,
{
    fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    #[inline]
    fn put_pixel(&mut self, x: usize, y: usize, color: u32) {
        Surface::put_pixel(self, x, y, color)
    }
}
