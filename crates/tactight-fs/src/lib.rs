//! Atomic placement of downloaded artifacts and kits.
//!
//! [`DownloadTrigger`] writes a blob to a staged temporary file next to its
//! destination and renames it into place. The staging file is owned by a
//! guard and removed on every failure path.

mod error;
mod staging;

pub use error::{Error, Result};

use std::path::PathBuf;

use error::from_io;
use staging::StagedFile;

use tactight_core::is_well_formed_filename;
use tracing::{debug, info};

/// Persists blobs into a download directory under caller-chosen names.
#[derive(Clone, Debug)]
pub struct DownloadTrigger {
    dir: PathBuf,
}

impl DownloadTrigger {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    /// Save `blob` as `filename` inside the download directory.
    ///
    /// An existing file of the same name is replaced. Returns the final path.
    ///
    /// # Errors
    ///
    /// [`Error::NoContent`] when `blob` is `None`, [`Error::InvalidFilename`]
    /// when `filename` is not a bare file name, and I/O errors otherwise.
    pub fn trigger_download(&self, blob: Option<&[u8]>, filename: &str) -> Result<PathBuf> {
        let blob = blob.ok_or(Error::NoContent)?;
        if !is_well_formed_filename(filename) {
            return Err(Error::InvalidFilename(filename.to_string()));
        }
        let filename = filename.trim();

        std::fs::create_dir_all(&self.dir).map_err(|e| from_io(&self.dir, e))?;
        let destination = self.dir.join(filename);

        let staged = StagedFile::write(&self.dir, blob)?;
        debug!(staging = %staged.path().display(), "staged download");
        staged.commit(&destination)?;

        info!(path = %destination.display(), size = blob.len(), "download saved");
        Ok(destination)
    }
}
