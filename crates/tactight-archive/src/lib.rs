//! Download kit assembly: the generated STL plus companion files in one zip.
//!
//! # Architecture
//!
//! - `data/` - Bundle, companion and packed-archive types
//! - `assemble.rs` - Companion fetching and bundle construction
//! - `pack.rs` - Zip encoding

pub use assemble::ArchiveAssembler;
pub use data::{ARCHIVE_NAME, ArchiveBundle, CompanionFile, CompanionWarning, PackedArchive};
pub use error::{Error, Result};

mod assemble;
pub mod data;
mod error;
mod pack;
