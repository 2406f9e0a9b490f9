pub mod bundle;
pub mod companion;

pub use bundle::{ARCHIVE_NAME, ArchiveBundle, PackedArchive};
pub use companion::{CompanionFile, CompanionWarning};
