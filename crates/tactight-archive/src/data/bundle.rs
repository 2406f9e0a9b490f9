use std::collections::BTreeMap;

use bytes::Bytes;

use super::companion::CompanionWarning;

/// Name of every kit download, whatever it contains.
pub const ARCHIVE_NAME: &str = "TacTight_kit.zip";

/// Entries collected for one kit download, plus what could not be collected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveBundle {
    entries:  BTreeMap<String, Bytes>,
    warnings: Vec<CompanionWarning>,
}

impl ArchiveBundle {
    pub fn new() -> Self { Self::default() }

    /// Add an entry unless one with the same name is already present.
    ///
    /// Returns `false` when the name was taken.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Bytes) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, bytes);
        true
    }

    pub fn warn(&mut self, warning: CompanionWarning) { self.warnings.push(warning); }

    pub fn entries(&self) -> &BTreeMap<String, Bytes> { &self.entries }

    pub fn get(&self, name: &str) -> Option<&Bytes> { self.entries.get(name) }

    pub fn warnings(&self) -> &[CompanionWarning] { &self.warnings }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// An encoded archive ready to hand to the download trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedArchive {
    pub name:  &'static str,
    pub bytes: Bytes,
}
