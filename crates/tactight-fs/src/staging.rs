use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, from_io};

const TEMP_PREFIX: &str = ".tactight.";
const TEMP_SUFFIX: &str = ".tmp";

#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A temporary sibling of the final file.
///
/// Removed on drop unless [`StagedFile::commit`] moved it into place, so an
/// interrupted download never leaves a stray `.tmp` behind. The temporary
/// name has a fixed shape independent of the destination name, so any name
/// that fits in the directory can be staged.
pub struct StagedFile {
    path:      PathBuf,
    committed: bool,
}

impl StagedFile {
    pub fn write(dir: &Path, content: &[u8]) -> Result<Self> {
        let tmp_name = format!(
            "{TEMP_PREFIX}{}.{}{TEMP_SUFFIX}",
            std::process::id(),
            NEXT_ID.fetch_add(1, Ordering::Relaxed)
        );
        let staged = Self {
            path:      dir.join(tmp_name),
            committed: false,
        };

        fs::write(&staged.path, content).map_err(|e| from_io(&staged.path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&staged.path, fs::Permissions::from_mode(FILE_MODE))
                .map_err(|e| from_io(&staged.path, e))?;
        }

        Ok(staged)
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Atomically move the staged file to `destination`.
    pub fn commit(mut self, destination: &Path) -> Result<()> {
        if destination.is_dir() {
            return Err(from_io(
                destination,
                std::io::Error::from(std::io::ErrorKind::IsADirectory),
            ));
        }
        fs::rename(&self.path, destination).map_err(|e| from_io(destination, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed && self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
