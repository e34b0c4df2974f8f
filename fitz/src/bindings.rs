use std::path::Path;

/// Raw libfitz function pointer table.
pub type FnTable = fitz_sys::libfitz;

/// Libfitz function bindings.
pub struct Bindings {
    pub(crate) ftable: FnTable,
}

impl Bindings {
    const LIBRARY_NAME: &'static str = fitz_sys::LIBRARY_NAME;

    pub fn load() -> Result<Bindings, libloading::Error> {
        Self::load_from_path(Self::LIBRARY_NAME)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Bindings, libloading::Error> {
        let ftable = unsafe { fitz_sys::libfitz::new(path.as_ref()) }?;

        let bindings = Bindings { ftable };
        Ok(bindings)
    }

    pub fn load_from_library(lib: libloading::Library) -> Result<Bindings, libloading::Error> {
        let ftable = unsafe { fitz_sys::libfitz::from_library(lib) }?;

        let bindings = Bindings { ftable };
        Ok(bindings)
    }

    pub fn ftable(&self) -> &FnTable {
        &self.ftable
    }
}
