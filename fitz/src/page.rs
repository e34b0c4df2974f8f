use crate::document::Document;
use crate::error::{Error, Result};
use crate::pixmap::Pixmap;
use crate::types::{self, Point2, Rect, Vector2};
use crate::Library;

use std::ffi::c_int;
use std::ops::DerefMut;
use std::ptr::NonNull;
use std::rc::Rc;

use nalgebra::{matrix, vector, Affine2, RealField};
use simba::scalar::SupersetOf;
use tracing::{debug, trace};

pub type PageHandle = NonNull<fitz_sys::pdf_page>;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        /// Blank the target region to white before drawing page content.
        const WhiteBackground = 1 << 0;

        /// Keep the renderer's native pixel order instead of converting
        /// the output to packed RGB words.
        const NativePixelOrder = 1 << 1;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags::WhiteBackground
    }
}

/// Page rotation in 90-degree steps, clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageRotation {
    /// Do not rotate.
    None,

    /// Rotate 90 degrees clockwise.
    Deg90,

    /// Rotate 180 degrees clockwise.
    Deg180,

    /// Rotate 270 degrees clockwise.
    Deg270,
}

impl PageRotation {
    pub(crate) fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(PageRotation::None),
            90 => Some(PageRotation::Deg90),
            180 => Some(PageRotation::Deg180),
            270 => Some(PageRotation::Deg270),
            _ => None,
        }
    }

    pub fn as_degrees(&self) -> i32 {
        match self {
            PageRotation::None => 0,
            PageRotation::Deg90 => 90,
            PageRotation::Deg180 => 180,
            PageRotation::Deg270 => 270,
        }
    }
}

#[derive(Clone)]
pub struct Page {
    inner: Rc<PageInner>,
}

struct PageInner {
    lib: Library,
    doc: Document,
    handle: PageHandle,
}

impl Page {
    pub(crate) fn new(lib: Library, doc: Document, handle: PageHandle) -> Self {
        let inner = PageInner { lib, doc, handle };

        Self {
            inner: Rc::new(inner),
        }
    }

    pub fn handle(&self) -> PageHandle {
        self.inner.handle
    }

    pub fn document(&self) -> &Document {
        &self.inner.doc
    }

    pub fn library(&self) -> &Library {
        &self.inner.lib
    }

    /// The page's media box in page space.
    pub fn media_box(&self) -> Rect {
        let mediabox = unsafe { (*self.handle().as_ptr()).mediabox };
        Rect::from(mediabox)
    }

    /// Media-box extent of this page.
    pub fn size(&self) -> Vector2<f32> {
        let media_box = self.media_box();
        Vector2::new(media_box.width(), media_box.height())
    }

    /// The page's rotation, normalized to a 90-degree step.
    pub fn rotation(&self) -> PageRotation {
        let degrees = unsafe { (*self.handle().as_ptr()).rotate };

        PageRotation::from_degrees(degrees).unwrap_or_else(|| {
            debug!(degrees, "unexpected page rotation value, ignoring");
            PageRotation::None
        })
    }

    /// Get the display matrix, transforming page coordinates to
    /// display/device coordinates.
    ///
    /// The returned map places the page into the viewport starting at
    /// `start` with extent `size`, flipping the y-coordinate so that the
    /// origin ends up at the top-left corner, and rotating in 90-degree
    /// steps. It does not do any clipping.
    pub fn display_transform<T>(
        &self,
        start: Point2<T>,
        size: Vector2<T>,
        rotate: PageRotation,
    ) -> Affine2<T>
    where
        T: RealField + Copy + SupersetOf<f32>,
    {
        viewport_transform(self.size().cast::<T>(), start, size, rotate)
    }

    /// Render this page into the pixmap's caller-supplied buffer.
    ///
    /// The transform maps page space to device space; the pixmap's view
    /// box selects the device-space region that is written, four bytes
    /// per pixel. After a successful render the pixel components are
    /// permuted into packed RGB words unless
    /// [`RenderFlags::NativePixelOrder`] is set.
    pub fn render<C>(
        &self,
        pixmap: &mut Pixmap<C>,
        transform: &Affine2<f32>,
        flags: RenderFlags,
    ) -> Result<()>
    where
        C: DerefMut<Target = [u8]>,
    {
        let ctm = types::affine_to_fzmatrix(transform);
        let bbox = fitz_sys::fz_irect::from(pixmap.view_box());
        let white = flags.contains(RenderFlags::WhiteBackground) as c_int;

        trace!(view_box = ?pixmap.view_box(), "rendering page");

        let tree = unsafe { (*self.handle().as_ptr()).tree };
        let mut pix = pixmap.handle().as_ptr();

        let status = unsafe {
            self.library().ftable().fz_rendertreetopixmap(
                &mut pix,
                self.document().renderer().as_ptr(),
                tree,
                ctm,
                bbox,
                white,
            )
        };
        if status != fitz_sys::fz_okay {
            return Err(Error::Render);
        }

        if !flags.contains(RenderFlags::NativePixelOrder) {
            pixmap.swap_pixel_order();
        }

        Ok(())
    }
}

impl Drop for PageInner {
    fn drop(&mut self) {
        trace!("dropping page");
        unsafe { self.lib.ftable().pdf_droppage(self.handle.as_ptr()) };
    }
}

/// Build the affine map taking page coordinates to the device viewport
/// given by `start` and `size`, flipping the y-axis and applying the
/// rotation.
fn viewport_transform<T>(
    page_size: Vector2<T>,
    start: Point2<T>,
    size: Vector2<T>,
    rotate: PageRotation,
) -> Affine2<T>
where
    T: RealField + Copy + SupersetOf<f32>,
{
    let left = start.x;
    let top = start.y;
    let right = start.x + size.x;
    let bottom = start.y + size.y;

    let (v0, v1, v2) = match rotate {
        PageRotation::None => {
            let v0 = vector![left, bottom];
            let v1 = vector![left, top];
            let v2 = vector![right, bottom];
            (v0, v1, v2)
        }
        PageRotation::Deg90 => {
            let v0 = vector![left, top];
            let v1 = vector![right, top];
            let v2 = vector![left, bottom];
            (v0, v1, v2)
        }
        PageRotation::Deg180 => {
            let v0 = vector![right, top];
            let v1 = vector![right, bottom];
            let v2 = vector![left, top];
            (v0, v1, v2)
        }
        PageRotation::Deg270 => {
            let v0 = vector![right, bottom];
            let v1 = vector![left, bottom];
            let v2 = vector![right, top];
            (v0, v1, v2)
        }
    };

    let m = matrix! {
        (v2.x - v0.x) / page_size.x, (v1.x - v0.x) / page_size.y, v0.x;
        (v2.y - v0.y) / page_size.x, (v1.y - v0.y) / page_size.y, v0.y;
        T::zero(), T::zero(), T::one();
    };

    nalgebra::try_convert(m).unwrap()
}

#[cfg(test)]
mod test {
    use super::*;

    use nalgebra::point;

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(PageRotation::from_degrees(0), Some(PageRotation::None));
        assert_eq!(PageRotation::from_degrees(90), Some(PageRotation::Deg90));
        assert_eq!(PageRotation::from_degrees(180), Some(PageRotation::Deg180));
        assert_eq!(PageRotation::from_degrees(270), Some(PageRotation::Deg270));

        // values outside [0, 360) are folded
        assert_eq!(PageRotation::from_degrees(360), Some(PageRotation::None));
        assert_eq!(PageRotation::from_degrees(450), Some(PageRotation::Deg90));
        assert_eq!(PageRotation::from_degrees(-90), Some(PageRotation::Deg270));

        // not a multiple of 90
        assert_eq!(PageRotation::from_degrees(45), None);
    }

    #[test]
    fn test_rotation_as_degrees() {
        for degrees in [0, 90, 180, 270] {
            let rotation = PageRotation::from_degrees(degrees).unwrap();
            assert_eq!(rotation.as_degrees(), degrees);
        }
    }

    #[test]
    fn test_viewport_transform() {
        let page_size = vector![600.0_f32, 800.0];
        let viewport = vector![600.0_f32, 800.0];

        let t = viewport_transform(page_size, point![0.0_f32, 0.0], viewport, PageRotation::None);

        // page origin is the bottom-left corner, device origin the top-left
        assert_eq!(t * point![0.0, 0.0], point![0.0, 800.0]);
        assert_eq!(t * point![0.0, 800.0], point![0.0, 0.0]);
        assert_eq!(t * point![600.0, 0.0], point![600.0, 800.0]);
    }

    #[test]
    fn test_viewport_transform_rotated() {
        let page_size = vector![600.0_f32, 800.0];
        // rotating by 90 degrees swaps the viewport's axes
        let viewport = vector![800.0_f32, 600.0];

        let t = viewport_transform(page_size, point![0.0_f32, 0.0], viewport, PageRotation::Deg90);

        assert_eq!(t * point![0.0, 0.0], point![0.0, 0.0]);
        assert_eq!(t * point![0.0, 800.0], point![800.0, 0.0]);
        assert_eq!(t * point![600.0, 0.0], point![0.0, 600.0]);
    }
}
