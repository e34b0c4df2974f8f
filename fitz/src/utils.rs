use crate::{Error, Result};

use std::ffi::{c_char, CStr};

/// Copy a NUL-terminated UTF-8 string out of library-owned memory.
///
/// # Safety
/// `ptr` must point to a valid NUL-terminated string.
pub(crate) unsafe fn utf8_from_ptr(ptr: *const c_char) -> Result<String> {
    let bytes = CStr::from_ptr(ptr).to_bytes();

    let value = std::str::from_utf8(bytes).map_err(|_| Error::InvalidEncoding)?;
    Ok(value.to_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    use std::ffi::CString;

    #[test]
    fn test_utf8_from_ptr() {
        let s = CString::new("Dokument Titel äöü").unwrap();

        let value = unsafe { utf8_from_ptr(s.as_ptr()) }.unwrap();
        assert_eq!(value, "Dokument Titel äöü");
    }

    #[test]
    fn test_utf8_from_ptr_invalid() {
        // 0xc3 starts a two-byte sequence, 0x28 is not a continuation byte
        let s = CString::new([0xc3, 0x28].as_slice()).unwrap();

        let value = unsafe { utf8_from_ptr(s.as_ptr()) };
        assert!(matches!(value, Err(Error::InvalidEncoding)));
    }
}
