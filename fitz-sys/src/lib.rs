//! Low-level dynamic bindings for the fitz PDF rendering library.
//!
//! The shared library is loaded at runtime and every symbol is resolved
//! up front; a missing symbol fails the load. Only the surface consumed
//! by the `fitz` wrapper crate is bound.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::too_many_arguments)]

use std::ffi::{c_char, c_int, c_void, OsStr};

/// Library error code; `fz_okay` signals success.
pub type fz_error = c_int;

pub const fz_okay: fz_error = 0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct fz_rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct fz_irect {
    pub x0: c_int,
    pub y0: c_int,
    pub x1: c_int,
    pub y1: c_int,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct fz_matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fz_colorspace {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fz_renderer {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fz_obj {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fz_tree {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fz_pixmap {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct pdf_xref {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct pdf_outline {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct pdf_comment {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct pdf_link {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct pdf_annot {
    _unused: [u8; 0],
}

/// A loaded page. The wrapper reads the geometry fields and hands the
/// content tree back to the renderer; the list members stay opaque.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct pdf_page {
    pub mediabox: fz_rect,
    pub rotate: c_int,
    pub comments: *mut pdf_comment,
    pub links: *mut pdf_link,
    pub annots: *mut pdf_annot,
    pub tree: *mut fz_tree,
}

// Declares the function table: one field, one resolver line, and one
// forwarding method per C function, plus resolved data symbols.
macro_rules! fn_table {
    (
        pub struct $table:ident;

        statics {
            $( $(#[$sattr:meta])* static $sname:ident: $sty:ty; )*
        }

        functions {
            $( $(#[$fattr:meta])* fn $fname:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?; )*
        }
    ) => {
        pub struct $table {
            #[allow(unused)]
            library: ::libloading::Library,
            $( $sname: $sty, )*
            $( $fname: unsafe extern "C" fn($($ty),*) $(-> $ret)?, )*
        }

        impl $table {
            pub unsafe fn new<P: AsRef<OsStr>>(path: P) -> Result<Self, ::libloading::Error> {
                let library = ::libloading::Library::new(path)?;
                Self::from_library(library)
            }

            pub unsafe fn from_library(
                library: ::libloading::Library,
            ) -> Result<Self, ::libloading::Error> {
                $(
                    let $sname: $sty =
                        *library.get(concat!(stringify!($sname), "\0").as_bytes())?;
                )*
                $(
                    let $fname: unsafe extern "C" fn($($ty),*) $(-> $ret)? =
                        *library.get(concat!(stringify!($fname), "\0").as_bytes())?;
                )*

                Ok(Self {
                    library,
                    $( $sname, )*
                    $( $fname, )*
                })
            }

            $(
                $(#[$sattr])*
                pub unsafe fn $sname(&self) -> $sty {
                    self.$sname
                }
            )*

            $(
                $(#[$fattr])*
                pub unsafe fn $fname(&self, $($arg: $ty),*) $(-> $ret)? {
                    (self.$fname)($($arg),*)
                }
            )*
        }
    };
}

fn_table! {
    pub struct libfitz;

    statics {
        /// The device RGB colorspace, resolved at load time.
        static pdf_devicergb: *mut fz_colorspace;
    }

    functions {
        fn fz_cpudetect();
        fn fz_accelerate();
        fn fz_free(ptr: *mut c_void);

        fn fz_newrenderer(
            rast: *mut *mut fz_renderer,
            colorspace: *mut fz_colorspace,
            maskonly: c_int,
            gcmem: c_int,
        ) -> fz_error;
        fn fz_droprenderer(rast: *mut fz_renderer);

        fn fz_dictgets(dict: *mut fz_obj, key: *const c_char) -> *mut fz_obj;
        fn fz_resolveindirect(obj: *mut fz_obj) -> *mut fz_obj;
        fn pdf_toutf8(obj: *mut fz_obj) -> *mut c_char;

        fn pdf_newxref() -> *mut pdf_xref;
        fn pdf_loadxref(xref: *mut pdf_xref, filename: *const c_char) -> fz_error;
        fn pdf_repairxref(xref: *mut pdf_xref, filename: *const c_char) -> fz_error;
        fn pdf_decryptxref(xref: *mut pdf_xref) -> fz_error;
        fn pdf_closexref(xref: *mut pdf_xref);
        fn pdf_gettrailer(xref: *mut pdf_xref) -> *mut fz_obj;
        fn pdf_flushxref(xref: *mut pdf_xref, force: c_int);

        fn pdf_needspassword(xref: *mut pdf_xref) -> c_int;
        fn pdf_authenticatepassword(xref: *mut pdf_xref, password: *const c_char) -> fz_error;

        fn pdf_getpagecount(xref: *mut pdf_xref) -> c_int;
        fn pdf_loadoutline(xref: *mut pdf_xref) -> *mut pdf_outline;
        fn pdf_dropoutline(outline: *mut pdf_outline);

        fn pdf_getpageobject(xref: *mut pdf_xref, pageno: c_int) -> *mut fz_obj;
        fn pdf_loadpage(
            page: *mut *mut pdf_page,
            xref: *mut pdf_xref,
            obj: *mut fz_obj,
        ) -> fz_error;
        fn pdf_droppage(page: *mut pdf_page);

        fn fz_newpixmapwithbufferandrect(
            pix: *mut *mut fz_pixmap,
            buf: *mut c_void,
            bbox: fz_irect,
            n: c_int,
        ) -> fz_error;
        fn fz_rendertreetopixmap(
            pix: *mut *mut fz_pixmap,
            rast: *mut fz_renderer,
            tree: *mut fz_tree,
            ctm: fz_matrix,
            bbox: fz_irect,
            white: c_int,
        ) -> fz_error;
        fn fz_droppixmapwithoutbuffer(pix: *mut fz_pixmap);
    }
}

#[cfg(all(target_family = "unix", not(target_os = "macos")))]
pub const LIBRARY_NAME: &str = "libfitz.so";

#[cfg(target_os = "macos")]
pub const LIBRARY_NAME: &str = "libfitz.dylib";

#[cfg(target_os = "windows")]
pub const LIBRARY_NAME: &str = "fitz.dll";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[ignore = "requires the libfitz shared library"]
    fn test_libfitz_available() {
        let _lib = unsafe { libfitz::new(LIBRARY_NAME) }.unwrap();
    }
}
