use crate::document::Document;
use crate::error::Result;
use crate::library::str_to_cstring;
use crate::utils;
use crate::Library;

pub struct Metadata<'a> {
    lib: &'a Library,
    doc: &'a Document,
}

impl<'a> Metadata<'a> {
    pub(crate) fn new(lib: &'a Library, doc: &'a Document) -> Self {
        Metadata { lib, doc }
    }

    pub fn get(&self, tag: MetadataTag) -> Result<Option<String>> {
        self.get_raw(tag.as_str())
    }

    /// Look up an arbitrary key in the document's Info dictionary.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        lookup(self.lib, self.doc.handle().as_ptr(), key)
    }
}

/// Resolve the trailer's Info dictionary and copy the value for `key`
/// out as UTF-8. An absent dictionary or key yields `None`.
pub(crate) fn lookup(
    lib: &Library,
    xref: *mut fitz_sys::pdf_xref,
    key: &str,
) -> Result<Option<String>> {
    let key = str_to_cstring(key)?;
    let ftable = lib.ftable();

    let entry = unsafe {
        let trailer = ftable.pdf_gettrailer(xref);

        let info =
            ftable.fz_resolveindirect(ftable.fz_dictgets(trailer, b"Info\0".as_ptr().cast()));
        if info.is_null() {
            return Ok(None);
        }

        ftable.fz_dictgets(info, key.as_ptr())
    };
    if entry.is_null() {
        return Ok(None);
    }

    let raw = unsafe { ftable.pdf_toutf8(entry) };
    if raw.is_null() {
        return Ok(None);
    }

    // copy out of the library-owned allocation before releasing it
    let value = unsafe { utils::utf8_from_ptr(raw) };
    unsafe { ftable.fz_free(raw.cast()) };

    Ok(Some(value?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataTag {
    Title,
    Author,
    Subject,
    Keywords,
    Creator,
    Producer,
    CreationDate,
    ModDate,
}

impl MetadataTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataTag::Title => "Title",
            MetadataTag::Author => "Author",
            MetadataTag::Subject => "Subject",
            MetadataTag::Keywords => "Keywords",
            MetadataTag::Creator => "Creator",
            MetadataTag::Producer => "Producer",
            MetadataTag::CreationDate => "CreationDate",
            MetadataTag::ModDate => "ModDate",
        }
    }
}

impl AsRef<str> for MetadataTag {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}
