use std::fmt;

/// A pre-existing file shipped alongside every generated STL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanionFile {
    /// Location relative to the site root.
    pub path: String,
    /// Entry name inside the archive.
    pub name: String,
}

impl CompanionFile {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// The clip and the assembly guide published with the site.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("assets/TacTight_strap_clip.stl", "TacTight_strap_clip.stl"),
            Self::new("assets/TacTight_assembly_guide.pdf", "TacTight_assembly_guide.pdf"),
        ]
    }
}

/// A companion that could not be included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanionWarning {
    pub name:   String,
    pub reason: String,
}

impl fmt::Display for CompanionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "companion file \"{}\" unavailable: {}", self.name, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_distinct_names() {
        let defaults = CompanionFile::defaults();
        assert_eq!(defaults.len(), 2);
        assert_ne!(defaults[0].name, defaults[1].name);
        assert!(defaults.iter().all(|c| !c.name.contains('/')));
    }

    #[test]
    fn warning_display() {
        let warning = CompanionWarning {
            name:   "guide.pdf".into(),
            reason: "HTTP 404".into(),
        };
        assert_eq!(warning.to_string(), "companion file \"guide.pdf\" unavailable: HTTP 404");
    }
}
