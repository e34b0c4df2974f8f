use crate::bindings::{Bindings, FnTable};
use crate::error::{Error, Result};

use std::ffi::CString;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

/// Initialized fitz bindings.
///
/// Cheap to clone; all clones share one function table and keep the
/// underlying shared library loaded.
#[derive(Clone)]
pub struct Library {
    inner: Rc<LibraryInner>,
}

struct LibraryInner {
    ftable: FnTable,
}

impl Library {
    pub fn init_with_bindings(bindings: Bindings) -> Library {
        debug!("initializing fitz bindings");

        // One-time hardware detection and rasterizer acceleration setup.
        // This API generation has no matching global teardown call.
        unsafe {
            bindings.ftable.fz_cpudetect();
            bindings.ftable.fz_accelerate();
        }

        let inner = LibraryInner {
            ftable: bindings.ftable,
        };

        Library {
            inner: Rc::new(inner),
        }
    }

    pub fn init() -> Result<Library> {
        Ok(Self::init_with_bindings(Bindings::load()?))
    }

    pub fn ftable(&self) -> &FnTable {
        &self.inner.ftable
    }
}

#[cfg(target_family = "unix")]
pub(crate) fn path_to_cstring(path: impl AsRef<Path>) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(path.as_ref().as_os_str().as_bytes()).map_err(|_| Error::InvalidEncoding)
}

#[cfg(not(target_family = "unix"))]
pub(crate) fn path_to_cstring(path: impl AsRef<Path>) -> Result<CString> {
    // FIXME: This assumes paths are always valid unicode, which might not be true

    let unicode = path.as_ref().to_str().ok_or(Error::InvalidEncoding)?;
    CString::new(unicode).map_err(|_| Error::InvalidEncoding)
}

pub(crate) fn str_to_cstring(value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| Error::InvalidEncoding)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[ignore = "requires the libfitz shared library"]
    fn test_init() {
        let _lib = Library::init().unwrap();
    }

    #[test]
    fn test_path_to_cstring() {
        let path = Path::new("/tmp/document.pdf");
        let cstr = path_to_cstring(path).unwrap();
        assert_eq!(cstr.as_bytes(), b"/tmp/document.pdf");
    }

    #[test]
    fn test_str_to_cstring_interior_nul() {
        assert!(matches!(
            str_to_cstring("pass\0word"),
            Err(Error::InvalidEncoding)
        ));
    }
}
