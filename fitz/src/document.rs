use crate::error::{Error, Result};
use crate::library::{path_to_cstring, str_to_cstring};
use crate::metadata::{self, Metadata};
use crate::pages::Pages;
use crate::Library;

use std::path::Path;
use std::ptr::NonNull;
use std::rc::Rc;

use tracing::{debug, info};

pub type DocumentHandle = NonNull<fitz_sys::pdf_xref>;
pub type RendererHandle = NonNull<fitz_sys::fz_renderer>;
pub type OutlineHandle = NonNull<fitz_sys::pdf_outline>;

/// Options controlling how a document is opened.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Byte budget for the renderer's glyph and image cache.
    pub renderer_cache_size: usize,
}

impl Default for OpenOptions {
    fn default() -> Self {
        OpenOptions {
            renderer_cache_size: 512 << 10,
        }
    }
}

impl Library {
    /// Open a document from a file, authenticating with `password` if the
    /// document is encrypted.
    pub fn open_file(&self, path: impl AsRef<Path>, password: Option<&str>) -> Result<Document> {
        Document::open(self, path.as_ref(), password, &OpenOptions::default())
    }

    pub fn open_file_with_options(
        &self,
        path: impl AsRef<Path>,
        password: Option<&str>,
        options: &OpenOptions,
    ) -> Result<Document> {
        Document::open(self, path.as_ref(), password, options)
    }
}

#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

struct DocumentInner {
    lib: Library,
    xref: DocumentHandle,
    renderer: RendererHandle,
    outline: Option<OutlineHandle>,
    title: Option<String>,
}

impl Document {
    fn open(
        lib: &Library,
        path: &Path,
        password: Option<&str>,
        options: &OpenOptions,
    ) -> Result<Document> {
        let filename = path_to_cstring(path)?;
        let password = str_to_cstring(password.unwrap_or(""))?;

        debug!(path = %path.display(), "opening document");

        let ftable = lib.ftable();

        // Per-document renderer, sized by the configured cache budget.
        let mut rast = std::ptr::null_mut();
        let status = unsafe {
            ftable.fz_newrenderer(
                &mut rast,
                ftable.pdf_devicergb(),
                0,
                options.renderer_cache_size as _,
            )
        };
        if status != fitz_sys::fz_okay {
            return Err(Error::Renderer);
        }
        let renderer = RendererGuard {
            lib,
            ptr: NonNull::new(rast).ok_or(Error::Renderer)?,
        };

        // Load the cross-reference table, falling back to reconstruction
        // for files with a damaged one.
        let xref = NonNull::new(unsafe { ftable.pdf_newxref() }).ok_or(Error::OutOfMemory)?;
        let xref = XrefGuard { lib, ptr: xref };

        let status = unsafe { ftable.pdf_loadxref(xref.ptr.as_ptr(), filename.as_ptr()) };
        if status != fitz_sys::fz_okay {
            info!(path = %path.display(), "damaged cross-reference table, trying to repair");

            let status = unsafe { ftable.pdf_repairxref(xref.ptr.as_ptr(), filename.as_ptr()) };
            if status != fitz_sys::fz_okay {
                return Err(Error::CannotRepair);
            }
        }

        let status = unsafe { ftable.pdf_decryptxref(xref.ptr.as_ptr()) };
        if status != fitz_sys::fz_okay {
            return Err(Error::CannotDecrypt);
        }

        // Encrypted documents must be authenticated before any object access.
        if unsafe { ftable.pdf_needspassword(xref.ptr.as_ptr()) } != 0 {
            if password.as_bytes().is_empty() {
                return Err(Error::NeedsPassword);
            }

            let status =
                unsafe { ftable.pdf_authenticatepassword(xref.ptr.as_ptr(), password.as_ptr()) };
            if status != fitz_sys::fz_okay {
                return Err(Error::WrongPassword);
            }
        }

        // The trailer must resolve a root object for the page tree.
        let root = unsafe {
            let trailer = ftable.pdf_gettrailer(xref.ptr.as_ptr());
            ftable.fz_resolveindirect(ftable.fz_dictgets(trailer, b"Root\0".as_ptr().cast()))
        };
        if root.is_null() {
            return Err(Error::MissingRoot);
        }

        let title = metadata::lookup(lib, xref.ptr.as_ptr(), "Title")?;

        // The outline tree is kept alive for the lifetime of the document.
        let outline = NonNull::new(unsafe { ftable.pdf_loadoutline(xref.ptr.as_ptr()) });

        let pages = unsafe { ftable.pdf_getpagecount(xref.ptr.as_ptr()) };
        debug!(pages, title = ?title, "document opened");

        let inner = DocumentInner {
            lib: lib.clone(),
            xref: xref.into_handle(),
            renderer: renderer.into_handle(),
            outline,
            title,
        };

        Ok(Document {
            inner: Rc::new(inner),
        })
    }

    pub fn handle(&self) -> DocumentHandle {
        self.inner.xref
    }

    pub fn library(&self) -> &Library {
        &self.inner.lib
    }

    pub(crate) fn renderer(&self) -> RendererHandle {
        self.inner.renderer
    }

    /// The document's Info title, read once at open time.
    pub fn title(&self) -> Option<&str> {
        self.inner.title.as_deref()
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.library(), self)
    }

    pub fn pages(&self) -> Pages {
        Pages::new(self.library(), self)
    }
}

impl Drop for DocumentInner {
    fn drop(&mut self) {
        debug!("closing document");

        // Release in reverse acquisition order.
        let ftable = self.lib.ftable();
        unsafe {
            if let Some(outline) = self.outline {
                ftable.pdf_dropoutline(outline.as_ptr());
            }
            ftable.pdf_closexref(self.xref.as_ptr());
            ftable.fz_droprenderer(self.renderer.as_ptr());
        }
    }
}

// Cleanup guards for the open path; disarmed once the document has taken
// ownership of the handles.

struct RendererGuard<'a> {
    lib: &'a Library,
    ptr: RendererHandle,
}

impl RendererGuard<'_> {
    fn into_handle(self) -> RendererHandle {
        let ptr = self.ptr;
        std::mem::forget(self);
        ptr
    }
}

impl Drop for RendererGuard<'_> {
    fn drop(&mut self) {
        unsafe { self.lib.ftable().fz_droprenderer(self.ptr.as_ptr()) };
    }
}

struct XrefGuard<'a> {
    lib: &'a Library,
    ptr: DocumentHandle,
}

impl XrefGuard<'_> {
    fn into_handle(self) -> DocumentHandle {
        let ptr = self.ptr;
        std::mem::forget(self);
        ptr
    }
}

impl Drop for XrefGuard<'_> {
    fn drop(&mut self) {
        unsafe { self.lib.ftable().pdf_closexref(self.ptr.as_ptr()) };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[ignore = "requires the libfitz shared library and a test document"]
    fn test_open_unencrypted() {
        let lib = Library::init().unwrap();
        let doc = lib.open_file("test.pdf", None).unwrap();

        assert!(doc.pages().count() > 0);
    }

    #[test]
    fn test_open_options_default() {
        let options = OpenOptions::default();
        assert_eq!(options.renderer_cache_size, 512 << 10);
    }
}
