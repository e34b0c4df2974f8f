use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error accessing shared library")]
    Library(#[from] libloading::Error),

    #[error("Out of memory")]
    OutOfMemory,

    #[error("Cannot create renderer")]
    Renderer,

    #[error("PDF file is corrupted and cannot be repaired")]
    CannotRepair,

    #[error("Cannot decrypt cross-reference table")]
    CannotDecrypt,

    #[error("Document is encrypted and needs a password")]
    NeedsPassword,

    #[error("Wrong password given")]
    WrongPassword,

    #[error("Document has no root object")]
    MissingRoot,

    #[error("Error loading page")]
    PageLoad,

    #[error("Error rendering page")]
    Render,

    #[error("Invalid encoding")]
    InvalidEncoding,

    #[error("Invalid argument")]
    InvalidArgument,
}

pub type Result<T> = std::result::Result<T, Error>;
