//! Directory entry representation.

use std::fs::Metadata;
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// Normalizes a name to NFC, the form names are stored under.
pub fn nfc_name(name: &str) -> String {
    name.nfc().collect()
}

/// A single entry read from the store, immutable once built.
///
/// `name` is the stored name byte for byte, so it can always be used to
/// address the entry again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    name: String,
    is_dir: bool,
    modified: Option<SystemTime>,
}

impl StoreEntry {
    /// Creates an entry from a raw file name and its metadata.
    pub fn new(name: &str, metadata: &Metadata) -> Self {
        Self {
            name: name.to_string(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Last-modified time, if the platform reports one.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}
