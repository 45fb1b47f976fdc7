//! Galleries: directories directly under the store root.

use crate::error::{CoreError, CoreResult};
use crate::fs::{nfc_name, FsStore, StoreError, StorePath};

/// A named collection of images, backed by one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    name: String,
}

impl Gallery {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The gallery name, which is also its directory name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resolves a gallery path parameter to its store location.
///
/// Used by every entry point that addresses an existing gallery; names that
/// are not a single segment fail with [`CoreError::InvalidPath`].
pub(crate) fn gallery_path(name: &str) -> CoreResult<StorePath> {
    StorePath::root()
        .join(name)
        .map_err(|_| CoreError::InvalidPath(name.to_string()))
}

/// Gallery-level operations on top of an [`FsStore`].
#[derive(Debug, Clone)]
pub struct GalleryRepository {
    store: FsStore,
}

impl GalleryRepository {
    pub fn new(store: FsStore) -> Self {
        Self { store }
    }

    /// Lists every directory under the store root, sorted by name
    /// (case-insensitive). Files at the root level are ignored.
    pub fn list(&self) -> CoreResult<Vec<Gallery>> {
        let entries = self.store.list_entries(&StorePath::root())?;
        let mut galleries: Vec<Gallery> = entries
            .into_iter()
            .filter(|e| e.is_dir())
            .map(|e| Gallery::new(e.name()))
            .collect();
        galleries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(galleries)
    }

    /// Creates a new, empty gallery. The name is stored in NFC form.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingName`] if `name` is absent or empty.
    /// - [`CoreError::InvalidName`] if `name` is not a single path segment.
    /// - [`CoreError::AlreadyExists`] if the gallery already exists.
    pub fn create(&self, name: Option<&str>) -> CoreResult<Gallery> {
        let name = match name {
            Some(n) if !n.is_empty() => nfc_name(n),
            _ => return Err(CoreError::MissingName),
        };
        let path = StorePath::root()
            .join(&name)
            .map_err(|_| CoreError::InvalidName(name.clone()))?;

        match self.store.create_directory(&path) {
            Ok(()) => {
                tracing::info!(gallery = %name, "created gallery");
                Ok(Gallery::new(name))
            }
            Err(StoreError::AlreadyExists(_)) => Err(CoreError::AlreadyExists(name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the gallery if it exists as a directory.
    pub fn get(&self, name: &str) -> CoreResult<Gallery> {
        let path = gallery_path(name)?;
        match self.store.stat(&path) {
            Ok(entry) if entry.is_dir() => Ok(Gallery::new(name)),
            Ok(_) | Err(StoreError::NotFound(_)) => Err(CoreError::GalleryNotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes an empty gallery.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidPath`] if `name` is not a single path segment.
    /// - [`CoreError::GalleryNotFound`] if no such gallery exists.
    /// - [`CoreError::NotEmpty`] if the gallery still holds any entry.
    pub fn delete(&self, name: &str) -> CoreResult<()> {
        let path = gallery_path(name)?;
        match self.store.delete_directory(&path) {
            Ok(()) => {
                tracing::info!(gallery = name, "deleted gallery");
                Ok(())
            }
            Err(StoreError::NotFound(_)) | Err(StoreError::NotADirectory(_)) => {
                Err(CoreError::GalleryNotFound(name.to_string()))
            }
            Err(StoreError::NotEmpty(_)) => Err(CoreError::NotEmpty(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
