use crate::error::{Error, Result};
use crate::types::IRect;
use crate::Library;

use std::ffi::c_void;
use std::ops::DerefMut;
use std::ptr::NonNull;

pub type PixmapHandle = NonNull<fitz_sys::fz_pixmap>;

/// Number of bytes per rendered pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A render target wrapping a caller-supplied pixel buffer.
///
/// The buffer backs the library-side pixmap directly: rendering writes
/// into it in place, four bytes per pixel, row-major over the view box.
/// Dropping the pixmap releases the library-side shell only; the buffer
/// stays with the caller.
pub struct Pixmap<C> {
    lib: Library,
    handle: PixmapHandle,
    view_box: IRect,
    buffer: C,
}

impl<C> Pixmap<C>
where
    C: DerefMut<Target = [u8]>,
{
    pub fn from_buf(lib: Library, view_box: IRect, buffer: C) -> Result<Pixmap<C>> {
        let mut buffer = buffer;

        if view_box.is_empty() {
            return Err(Error::InvalidArgument);
        }

        // check buffer size
        let expected_size =
            view_box.width() as usize * view_box.height() as usize * BYTES_PER_PIXEL;
        if buffer.len() < expected_size {
            return Err(Error::InvalidArgument);
        }

        let mut pix = std::ptr::null_mut();
        let status = unsafe {
            lib.ftable().fz_newpixmapwithbufferandrect(
                &mut pix,
                buffer.as_mut_ptr() as *mut c_void,
                view_box.into(),
                BYTES_PER_PIXEL as _,
            )
        };
        if status != fitz_sys::fz_okay {
            return Err(Error::OutOfMemory);
        }
        let handle = NonNull::new(pix).ok_or(Error::OutOfMemory)?;

        let pixmap = Pixmap {
            lib,
            handle,
            view_box,
            buffer,
        };

        Ok(pixmap)
    }

    pub fn buf(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    pub(crate) fn swap_pixel_order(&mut self) {
        let len = self.view_box.width() as usize * self.view_box.height() as usize
            * BYTES_PER_PIXEL;

        swap_pixel_order(&mut self.buffer[..len]);
    }
}

impl<C> Pixmap<C> {
    pub fn handle(&self) -> PixmapHandle {
        self.handle
    }

    pub fn library(&self) -> &Library {
        &self.lib
    }

    pub fn view_box(&self) -> IRect {
        self.view_box
    }

    pub fn width(&self) -> u32 {
        self.view_box.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.view_box.height() as u32
    }
}

impl<C> Drop for Pixmap<C> {
    fn drop(&mut self) {
        // Releases the pixmap shell only, never the caller's buffer.
        unsafe {
            self.lib
                .ftable()
                .fz_droppixmapwithoutbuffer(self.handle.as_ptr())
        };
    }
}

/// Permute each pixel's components from the renderer's native order into
/// packed RGB words.
pub(crate) fn swap_pixel_order(buf: &mut [u8]) {
    for px in buf.chunks_exact_mut(BYTES_PER_PIXEL) {
        let v = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
        let v = ((v & 0xFF00_0000) >> 24) | ((v & 0x00FF_0000) >> 8) | ((v & 0x0000_FF00) << 8);
        px.copy_from_slice(&v.to_ne_bytes());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[cfg(target_endian = "little")]
    fn test_swap_pixel_order() {
        // two pixels in the renderer's native component order
        let mut buf = [0x11, 0x22, 0x33, 0x44, 0xaa, 0xbb, 0xcc, 0xdd];

        swap_pixel_order(&mut buf);
        assert_eq!(buf, [0x44, 0x33, 0x22, 0x00, 0xdd, 0xcc, 0xbb, 0x00]);
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn test_swap_pixel_order_tail() {
        // a trailing partial pixel is left untouched
        let mut buf = [0x11, 0x22, 0x33, 0x44, 0xaa, 0xbb];

        swap_pixel_order(&mut buf);
        assert_eq!(buf, [0x44, 0x33, 0x22, 0x00, 0xaa, 0xbb]);
    }
}
