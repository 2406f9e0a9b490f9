use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no generated artifact to bundle")]
    NoArtifact,

    #[error("failed to pack archive: {source}")]
    Pack {
        #[from]
        source: zip::result::ZipError,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
