//! Validated relative paths below the store root.

use std::fmt;
use std::path::PathBuf;

/// Why a string was rejected as a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("segment is empty")]
    Empty,
    #[error("segment is a relative directory reference")]
    Reserved,
    #[error("segment contains a path separator")]
    Separator,
    #[error("segment contains a NUL byte")]
    Nul,
}

/// Checks that `segment` names exactly one entry inside a directory.
///
/// Rejects the empty string, `.` and `..`, anything containing `/` or `\`,
/// and embedded NUL bytes. Absolute paths are covered by the separator rule.
pub fn validate_segment(segment: &str) -> Result<(), SegmentError> {
    if segment.is_empty() {
        return Err(SegmentError::Empty);
    }
    if segment == "." || segment == ".." {
        return Err(SegmentError::Reserved);
    }
    if segment.contains(['/', '\\']) {
        return Err(SegmentError::Separator);
    }
    if segment.contains('\0') {
        return Err(SegmentError::Nul);
    }
    Ok(())
}

/// A relative location below the store root.
///
/// Built from [`StorePath::root`] with [`StorePath::join`]; every segment has
/// passed [`validate_segment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    /// The store root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: &str) -> Result<Self, SegmentError> {
        validate_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// The last segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Converts to a relative [`PathBuf`] using the platform separator.
    pub fn to_relative(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_valid() {
        assert!(validate_segment("Wild animals").is_ok());
        assert!(validate_segment("cat.png").is_ok());
        assert!(validate_segment(".hidden").is_ok());
        assert!(validate_segment("...").is_ok());
    }

    #[test]
    fn traversal_segments_are_rejected() {
        assert_eq!(validate_segment(""), Err(SegmentError::Empty));
        assert_eq!(validate_segment("."), Err(SegmentError::Reserved));
        assert_eq!(validate_segment(".."), Err(SegmentError::Reserved));
        assert_eq!(validate_segment("a/b"), Err(SegmentError::Separator));
        assert_eq!(validate_segment("/etc"), Err(SegmentError::Separator));
        assert_eq!(validate_segment("..\\x"), Err(SegmentError::Separator));
        assert_eq!(validate_segment("a\0b"), Err(SegmentError::Nul));
    }

    #[test]
    fn join_builds_nested_path() {
        let path = StorePath::root().join("Zoo").unwrap().join("cat.png").unwrap();
        assert_eq!(path.to_string(), "Zoo/cat.png");
        assert_eq!(path.file_name(), Some("cat.png"));
        assert_eq!(path.to_relative(), PathBuf::from("Zoo").join("cat.png"));
    }

    #[test]
    fn join_rejects_without_mutating() {
        let gallery = StorePath::root().join("Zoo").unwrap();
        assert!(gallery.join("../etc").is_err());
        assert_eq!(gallery.to_string(), "Zoo");
    }

    #[test]
    fn root_is_empty() {
        let root = StorePath::root();
        assert_eq!(root.to_relative(), PathBuf::new());
        assert_eq!(root.file_name(), None);
        assert_eq!(root.to_string(), "");
    }
}
