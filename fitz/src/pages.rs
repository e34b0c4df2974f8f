use crate::document::Document;
use crate::error::{Error, Result};
use crate::page::Page;
use crate::Library;

use std::ffi::c_int;
use std::ptr::NonNull;

use tracing::trace;

pub struct Pages<'a> {
    lib: &'a Library,
    doc: &'a Document,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(lib: &'a Library, doc: &'a Document) -> Self {
        Pages { lib, doc }
    }

    pub fn count(&self) -> u32 {
        let xref = self.doc.handle().as_ptr();
        unsafe { self.lib.ftable().pdf_getpagecount(xref) as u32 }
    }

    /// Load the page at `index` (zero-based).
    pub fn get(&self, index: u32) -> Result<Page> {
        let xref = self.doc.handle().as_ptr();
        let ftable = self.lib.ftable();

        // Age out cached objects before pulling in a new page.
        unsafe { ftable.pdf_flushxref(xref, 0) };

        // The wrapped API numbers pages starting at one.
        let obj = unsafe { ftable.pdf_getpageobject(xref, index as c_int + 1) };
        if obj.is_null() {
            return Err(Error::PageLoad);
        }

        let mut page = std::ptr::null_mut();
        let status = unsafe { ftable.pdf_loadpage(&mut page, xref, obj) };
        if status != fitz_sys::fz_okay {
            return Err(Error::PageLoad);
        }
        let handle = NonNull::new(page).ok_or(Error::PageLoad)?;

        trace!(index, "page loaded");

        Ok(Page::new(self.lib.clone(), self.doc.clone(), handle))
    }
}
