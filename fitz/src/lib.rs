mod bindings;
mod document;
mod error;
mod library;
mod metadata;
mod page;
mod pages;
mod pixmap;
mod types;
mod utils;

pub use document::{Document, OpenOptions};
pub use error::{Error, Result};
pub use library::Library;
pub use metadata::{Metadata, MetadataTag};
pub use page::{Page, PageRotation, RenderFlags};
pub use pages::Pages;
pub use pixmap::Pixmap;
pub use types::{IRect, Rect};

pub mod lowlevel {
    pub use crate::bindings::{Bindings, FnTable};
    pub use crate::document::DocumentHandle;
    pub use crate::page::PageHandle;
    pub use crate::pixmap::PixmapHandle;
}

#[cfg(test)]
mod test {
    use super::lowlevel::Bindings;

    #[test]
    #[ignore = "requires the libfitz shared library"]
    fn test_libfitz_available() {
        let _lib = Bindings::load().unwrap();
    }
}
