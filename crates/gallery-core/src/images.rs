//! Images: regular files inside a gallery directory.

use std::time::SystemTime;

use crate::error::{CoreError, CoreResult};
use crate::fs::{nfc_name, FsStore, StoreEntry, StoreError, StorePath};
use crate::galleries::gallery_path;

/// Suffix appended to the logical name of a resized derivative.
pub const DERIVATIVE_SUFFIX: &str = "-resized.jpg";

/// Returns the display name of a stored file: everything before the first
/// `.`, or the whole name when it has no `.`.
///
/// `".hidden"` therefore yields `""` and `"archive.tar.gz"` yields
/// `"archive"`.
pub fn logical_name(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// File name of the resized derivative produced for `file_name`.
pub fn derivative_name(file_name: &str) -> String {
    format!("{}{DERIVATIVE_SUFFIX}", logical_name(file_name))
}

/// Returns `true` for files written by the resize service.
pub fn is_derivative(file_name: &str) -> bool {
    file_name.ends_with(DERIVATIVE_SUFFIX)
}

/// An image stored in exactly one gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    gallery: String,
    file_name: String,
    modified: Option<SystemTime>,
}

impl Image {
    fn from_entry(gallery: &str, entry: &StoreEntry) -> Self {
        Self {
            gallery: gallery.to_string(),
            file_name: entry.name().to_string(),
            modified: entry.modified(),
        }
    }

    pub fn gallery(&self) -> &str {
        &self.gallery
    }

    /// Stored file name, extension included.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// See [`logical_name`].
    pub fn logical_name(&self) -> &str {
        logical_name(&self.file_name)
    }

    /// `<gallery>/<file name>`, unencoded.
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.gallery, self.file_name)
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

/// A file received for upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

fn image_path(gallery: &StorePath, file_name: &str) -> CoreResult<StorePath> {
    gallery
        .join(file_name)
        .map_err(|_| CoreError::InvalidImageName(file_name.to_string()))
}

/// Image-level operations on top of an [`FsStore`].
#[derive(Debug, Clone)]
pub struct ImageRepository {
    store: FsStore,
}

impl ImageRepository {
    pub fn new(store: FsStore) -> Self {
        Self { store }
    }

    /// Regular files of a gallery, derivatives included, unsorted.
    fn files(&self, gallery: &str) -> CoreResult<Vec<StoreEntry>> {
        let dir = gallery_path(gallery)?;
        match self.store.list_entries(&dir) {
            Ok(entries) => Ok(entries.into_iter().filter(|e| !e.is_dir()).collect()),
            Err(StoreError::NotFound(_)) | Err(StoreError::NotADirectory(_)) => {
                Err(CoreError::GalleryNotFound(gallery.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Picks the right "not found" error once a file lookup has failed.
    fn not_found(&self, gallery: &str, file_name: &str) -> CoreError {
        let gallery_exists = gallery_path(gallery)
            .ok()
            .and_then(|p| self.store.stat(&p).ok())
            .is_some_and(|e| e.is_dir());
        if gallery_exists {
            CoreError::ImageNotFound {
                gallery: gallery.to_string(),
                image: file_name.to_string(),
            }
        } else {
            CoreError::GalleryNotFound(gallery.to_string())
        }
    }

    /// Lists the images of a gallery sorted by file name.
    ///
    /// Nested directories and resized derivatives are not listed.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidPath`] if `gallery` is not a single segment.
    /// - [`CoreError::GalleryNotFound`] if the gallery does not exist.
    pub fn list(&self, gallery: &str) -> CoreResult<Vec<Image>> {
        let mut images: Vec<Image> = self
            .files(gallery)?
            .iter()
            .filter(|e| !is_derivative(e.name()))
            .map(|e| Image::from_entry(gallery, e))
            .collect();
        images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(images)
    }

    /// Looks an image up among the gallery's current entries.
    ///
    /// An exact match wins; otherwise names are compared in NFC form. The
    /// returned image carries the stored file name.
    pub fn find(&self, gallery: &str, file_name: &str) -> CoreResult<Image> {
        image_path(&gallery_path(gallery)?, file_name)?;
        let files = self.files(gallery)?;
        let wanted = nfc_name(file_name);
        files
            .iter()
            .find(|e| e.name() == file_name)
            .or_else(|| files.iter().find(|e| nfc_name(e.name()) == wanted))
            .map(|e| Image::from_entry(gallery, e))
            .ok_or_else(|| CoreError::ImageNotFound {
                gallery: gallery.to_string(),
                image: file_name.to_string(),
            })
    }

    /// Store location of an existing image, resolved through [`Self::find`].
    fn locate(&self, gallery: &str, file_name: &str) -> CoreResult<StorePath> {
        let image = self.find(gallery, file_name)?;
        image_path(&gallery_path(gallery)?, image.file_name())
    }

    /// Stores one file in a gallery, replacing any file of the same name.
    /// The file name is stored in NFC form.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidPath`] / [`CoreError::InvalidImageName`] for
    ///   names that are not a single path segment.
    /// - [`CoreError::GalleryNotFound`] if the gallery does not exist.
    pub fn upload(&self, gallery: &str, file_name: &str, bytes: &[u8]) -> CoreResult<Image> {
        let dir = gallery_path(gallery)?;
        let path = image_path(&dir, &nfc_name(file_name))?;
        self.ensure_gallery(gallery, &dir)?;
        self.write(gallery, &path, bytes)
    }

    /// Stores every upload in a gallery and returns their descriptors in
    /// input order. All names are validated before anything is written.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingFile`] if `uploads` is empty, otherwise as
    /// [`ImageRepository::upload`].
    pub fn upload_all(&self, gallery: &str, uploads: &[Upload]) -> CoreResult<Vec<Image>> {
        if uploads.is_empty() {
            return Err(CoreError::MissingFile);
        }
        let dir = gallery_path(gallery)?;
        let paths = uploads
            .iter()
            .map(|u| image_path(&dir, &nfc_name(&u.file_name)))
            .collect::<CoreResult<Vec<_>>>()?;
        self.ensure_gallery(gallery, &dir)?;

        paths
            .iter()
            .zip(uploads)
            .map(|(path, upload)| self.write(gallery, path, &upload.bytes))
            .collect()
    }

    fn ensure_gallery(&self, gallery: &str, dir: &StorePath) -> CoreResult<()> {
        match self.store.stat(dir) {
            Ok(entry) if entry.is_dir() => Ok(()),
            Ok(_) | Err(StoreError::NotFound(_)) => Err(CoreError::GalleryNotFound(gallery.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, gallery: &str, path: &StorePath, bytes: &[u8]) -> CoreResult<Image> {
        match self.store.write_file(path, bytes) {
            Ok(()) => {}
            // gallery removed between the existence check and the write
            Err(StoreError::NotFound(_)) => {
                return Err(CoreError::GalleryNotFound(gallery.to_string()))
            }
            Err(e) => return Err(e.into()),
        }
        let entry = self.store.stat(path)?;
        tracing::info!(gallery, image = entry.name(), size = bytes.len(), "stored image");
        Ok(Image::from_entry(gallery, &entry))
    }

    /// Returns the stored bytes of an image.
    pub fn read(&self, gallery: &str, file_name: &str) -> CoreResult<Vec<u8>> {
        let path = self.locate(gallery, file_name)?;
        match self.store.read_file(&path) {
            Ok(bytes) => Ok(bytes),
            Err(StoreError::NotFound(_)) | Err(StoreError::NotAFile(_)) => {
                Err(self.not_found(gallery, file_name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes an image.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ImageNotFound`] if the file does not exist.
    /// - [`CoreError::GalleryNotFound`] if the gallery itself is missing.
    pub fn delete(&self, gallery: &str, file_name: &str) -> CoreResult<()> {
        let path = self.locate(gallery, file_name)?;
        match self.store.delete_file(&path) {
            Ok(()) => {
                tracing::info!(gallery, image = %path, "deleted image");
                Ok(())
            }
            Err(StoreError::NotFound(_)) | Err(StoreError::NotAFile(_)) => {
                Err(self.not_found(gallery, file_name))
            }
            Err(e) => Err(e.into()),
        }
    }
}
