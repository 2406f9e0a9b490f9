use bytes::Bytes;
use tracing::debug;

/// A generated STL payload and the name it should be saved under.
///
/// Never empty: [`GeneratedArtifact::from_payload`] refuses zero-length bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    bytes:              Bytes,
    suggested_filename: String,
}

impl GeneratedArtifact {
    /// Wrap a payload, or `None` when it is empty.
    pub fn from_payload(bytes: impl Into<Bytes>, suggested_filename: impl Into<String>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            bytes,
            suggested_filename: suggested_filename.into(),
        })
    }

    pub fn bytes(&self) -> &Bytes { &self.bytes }

    pub fn suggested_filename(&self) -> &str { &self.suggested_filename }

    pub fn size_bytes(&self) -> u64 { self.bytes.len() as u64 }

    /// Size in KiB rounded to the nearest whole number.
    pub fn size_kb(&self) -> u64 { (self.size_bytes() + 512) / 1024 }
}

/// Per-session state: the single most recent artifact.
///
/// Written by the generator on success, read by the archive assembler and
/// the download trigger. A new artifact replaces the old one.
#[derive(Debug, Default)]
pub struct Session {
    artifact: Option<GeneratedArtifact>,
}

impl Session {
    pub fn new() -> Self { Self::default() }

    pub fn artifact(&self) -> Option<&GeneratedArtifact> { self.artifact.as_ref() }

    pub fn has_artifact(&self) -> bool { self.artifact.is_some() }

    /// Store `artifact`, returning the one it replaced.
    pub fn replace_artifact(&mut self, artifact: GeneratedArtifact) -> Option<GeneratedArtifact> {
        debug!(
            filename = artifact.suggested_filename(),
            size = artifact.size_bytes(),
            "holding generated artifact"
        );
        self.artifact.replace(artifact)
    }

    pub fn clear(&mut self) -> Option<GeneratedArtifact> { self.artifact.take() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_not_an_artifact() {
        assert!(GeneratedArtifact::from_payload(Vec::new(), "a.stl").is_none());
    }

    #[test]
    fn test_size_kb_rounds() {
        let small = GeneratedArtifact::from_payload(vec![0u8; 511], "a.stl").unwrap();
        assert_eq!(small.size_kb(), 0);
        let half = GeneratedArtifact::from_payload(vec![0u8; 1536], "a.stl").unwrap();
        assert_eq!(half.size_kb(), 2);
        let exact = GeneratedArtifact::from_payload(vec![0u8; 2048], "a.stl").unwrap();
        assert_eq!(exact.size_kb(), 2);
    }

    #[test]
    fn test_session_holds_one_artifact() {
        let mut session = Session::new();
        assert!(!session.has_artifact());

        let first = GeneratedArtifact::from_payload(&b"first"[..], "first.stl").unwrap();
        let second = GeneratedArtifact::from_payload(&b"second"[..], "second.stl").unwrap();

        assert_eq!(session.replace_artifact(first.clone()), None);
        assert_eq!(session.replace_artifact(second.clone()), Some(first));
        assert_eq!(session.artifact(), Some(&second));

        assert_eq!(session.clear(), Some(second));
        assert!(session.artifact().is_none());
    }
}
