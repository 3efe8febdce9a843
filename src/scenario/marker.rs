//! Marker artifacts: out-of-band proof that a payload executed.
//!
//! A marker path is generated fresh for every scenario run and is never
//! created by the harness itself - only the injected payload can bring it
//! into existence. Uniqueness comes from a v4 UUID, which also keeps
//! concurrent runs of the harness from colliding in the shared temp
//! directory.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A uniquely-named filesystem artifact used to prove command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerArtifact {
    path: PathBuf,
}

impl MarkerArtifact {
    /// Generates a marker path under the OS temp directory.
    ///
    /// The file is NOT created; the returned path does not exist yet.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let label: String = label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        let file = format!("spawnjack-{label}-{}.txt", Uuid::new_v4());
        Self {
            path: std::env::temp_dir().join(file),
        }
    }

    /// The marker path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the payload created the marker.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the marker content with surrounding whitespace trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker does not exist or cannot be read.
    pub fn read_trimmed(&self) -> io::Result<String> {
        Ok(std::fs::read_to_string(&self.path)?.trim().to_string())
    }

    /// Removes the marker. A marker that was never created is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing marker cannot be removed.
    pub fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_never_pre_exists() {
        let marker = MarkerArtifact::new("pre-exist");
        assert!(!marker.exists());
    }

    #[test]
    fn test_marker_paths_are_unique() {
        let a = MarkerArtifact::new("same-label");
        let b = MarkerArtifact::new("same-label");
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_label_is_sanitized() {
        let marker = MarkerArtifact::new("../../etc/passwd");
        let name = marker.path().file_name().unwrap().to_string_lossy();
        assert!(!name.contains('/'));
        assert!(name.starts_with("spawnjack-"));
        // the marker still lands directly in the temp dir
        assert_eq!(marker.path().parent().unwrap(), std::env::temp_dir());
    }

    #[test]
    fn test_read_trimmed() {
        let marker = MarkerArtifact::new("read");
        std::fs::write(marker.path(), "Sensitive data: a@b\n").unwrap();
        assert_eq!(marker.read_trimmed().unwrap(), "Sensitive data: a@b");
        marker.remove().unwrap();
    }

    #[test]
    fn test_remove_is_idempotent() {
        let marker = MarkerArtifact::new("remove");
        std::fs::write(marker.path(), "x").unwrap();
        marker.remove().unwrap();
        assert!(!marker.exists());
        // second removal of a missing marker succeeds
        marker.remove().unwrap();
    }
}
