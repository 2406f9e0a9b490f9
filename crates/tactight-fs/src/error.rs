use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no content available for download")]
    NoContent,

    #[error("invalid download filename: {0:?}")]
    InvalidFilename(String),

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("destination is a directory: {}", path.display())]
    DestinationIsDirectory { path: PathBuf },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn from_io(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        io::ErrorKind::IsADirectory => Error::DestinationIsDirectory {
            path: path.to_path_buf(),
        },
        _ => Error::Write {
            path:   path.to_path_buf(),
            source: err,
        },
    }
}
