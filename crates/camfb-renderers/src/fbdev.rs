//! Linux framebuffer device (`/dev/fbN`) access: screen geometry queries and
//! shared read/write mapping of the visible screen memory.

use std::{
    fs::{File, OpenOptions},
    io,
    ops::{Deref, DerefMut},
    os::unix::io::AsRawFd,
    ptr::{self, NonNull},
    slice,
};

use camfb_core::surface::{Channel, ChannelLayout, PixelDepth, SurfaceDescriptor};
use log::{info, warn};

use crate::error::SurfaceError;

pub const DEFAULT_DEVICE_PATH: &str = "/dev/fb0";

const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbFixScreeninfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    type_: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbVarScreeninfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

impl From<FbBitfield> for Channel {
    fn from(bitfield: FbBitfield) -> Self {
        Channel::new(bitfield.offset, bitfield.length)
    }
}

/// An open framebuffer device. The handle is closed on drop.
pub struct FramebufferDevice {
    file: File,
    path: String,

    fix_info: FbFixScreeninfo,
    var_info: FbVarScreeninfo,
}

impl FramebufferDevice {
    pub fn open(path: &str) -> Result<Self, SurfaceError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| SurfaceError::Open {
                path: path.to_string(),
                source,
            })?;

        let mut fix_info = FbFixScreeninfo::default();
        query(&file, FBIOGET_FSCREENINFO, "FBIOGET_FSCREENINFO", &mut fix_info)?;

        let mut var_info = FbVarScreeninfo::default();
        query(&file, FBIOGET_VSCREENINFO, "FBIOGET_VSCREENINFO", &mut var_info)?;

        let device = Self {
            file,
            path: path.to_string(),
            fix_info,
            var_info,
        };
        device.log_screen_info();

        Ok(device)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn descriptor(&self) -> Result<SurfaceDescriptor, SurfaceError> {
        let var = &self.var_info;

        let depth = PixelDepth::from_bits(var.bits_per_pixel)
            .ok_or(SurfaceError::UnsupportedDepth(var.bits_per_pixel))?;

        Ok(SurfaceDescriptor {
            width: var.xres as usize,
            height: var.yres as usize,
            row_stride_bytes: self.fix_info.line_length as usize,
            depth,
            channel_layout: ChannelLayout {
                red: var.red.into(),
                green: var.green.into(),
                blue: var.blue.into(),
            },
        })
    }

    /// Maps `line_length * yres` bytes of screen memory, shared and writable.
    pub fn map(&self) -> Result<FramebufferMapping, SurfaceError> {
        let len = self.fix_info.line_length as usize * self.var_info.yres as usize;

        let address = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.file.as_raw_fd(),
                0,
            )
        };

        if address == libc::MAP_FAILED {
            return Err(SurfaceError::Mmap {
                len,
                source: io::Error::last_os_error(),
            });
        }

        let address = NonNull::new(address as *mut u8).ok_or(SurfaceError::Mmap {
            len,
            source: io::Error::from(io::ErrorKind::AddrNotAvailable),
        })?;

        info!("framebuffer mmap address={:p}", address);
        info!("framebuffer size={} bytes", len);

        Ok(FramebufferMapping { address, len })
    }

    fn log_screen_info(&self) {
        let (fix, var) = (&self.fix_info, &self.var_info);

        info!("Screen resolution: ({}x{})", var.xres, var.yres);
        info!("x offset, y offset : {}, {}", var.xoffset, var.yoffset);
        info!("Line width in bytes {}", fix.line_length);
        info!("bits per pixel : {}", var.bits_per_pixel);
        info!("Red: length {} bits, offset {}", var.red.length, var.red.offset);
        info!("Green: length {} bits, offset {}", var.green.length, var.green.offset);
        info!("Blue: length {} bits, offset {}", var.blue.length, var.blue.offset);
    }
}

fn query<T>(
    file: &File,
    request: libc::c_ulong,
    name: &'static str,
    info: &mut T,
) -> Result<(), SurfaceError> {
    let result = unsafe { libc::ioctl(file.as_raw_fd(), request as _, info as *mut T) };

    if result < 0 {
        return Err(SurfaceError::Ioctl {
            request: name,
            source: io::Error::last_os_error(),
        });
    }

    Ok(())
}

/// Screen memory mapped into the process, unmapped on drop.
pub struct FramebufferMapping {
    address: NonNull<u8>,
    len: usize,
}

impl Deref for FramebufferMapping {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.address.as_ptr(), self.len) }
    }
}

impl DerefMut for FramebufferMapping {
    fn deref_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.address.as_ptr(), self.len) }
    }
}

impl Drop for FramebufferMapping {
    fn drop(&mut self) {
        let result = unsafe { libc::munmap(self.address.as_ptr() as *mut libc::c_void, self.len) };

        if result < 0 {
            warn!("munmap failed: {}", io::Error::last_os_error());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn screeninfo_layouts_match_the_kernel_abi() {
        assert_eq!(mem::size_of::<FbBitfield>(), 12);
        assert_eq!(mem::size_of::<FbVarScreeninfo>(), 160);

        let expected_fix = if mem::size_of::<libc::c_ulong>() == 8 { 80 } else { 68 };
        assert_eq!(mem::size_of::<FbFixScreeninfo>(), expected_fix);
    }

    #[test]
    fn missing_device_is_reported() {
        let result = FramebufferDevice::open("/nonexistent/fb0");
        assert!(matches!(result, Err(SurfaceError::Open { .. })));
    }

    #[test]
    fn bitfields_become_channels() {
        let bitfield = FbBitfield {
            offset: 11,
            length: 5,
            msb_right: 0,
        };
        assert_eq!(Channel::from(bitfield), Channel::new(11, 5));
    }
}
