use std::io::{Cursor, Write};

use bytes::Bytes;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;
use crate::data::{ARCHIVE_NAME, ArchiveBundle, PackedArchive};

#[cfg(unix)]
const ENTRY_PERMISSIONS: u32 = 0o644;

impl ArchiveBundle {
    /// Encode every entry into a deflated zip named [`ARCHIVE_NAME`].
    ///
    /// Entries sit at the archive root under their literal names.
    pub fn pack(&self) -> Result<PackedArchive> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        #[cfg(unix)]
        let options = options.unix_permissions(ENTRY_PERMISSIONS);

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in self.entries() {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(bytes)?;
        }
        let bytes = Bytes::from(writer.finish()?.into_inner());

        debug!(entries = self.len(), size = bytes.len(), "packed {ARCHIVE_NAME}");

        Ok(PackedArchive {
            name: ARCHIVE_NAME,
            bytes,
        })
    }
}
