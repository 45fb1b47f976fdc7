//! Error types for `gallery-core`.
//!
//! All repository and resize operations return [`CoreResult<T>`], which is an
//! alias for `Result<T, CoreError>`. Low-level store and codec failures are
//! translated into a [`CoreError`] before they leave this crate.

use crate::fs::StoreError;

/// Broad classification of a [`CoreError`], used by frontends to pick a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// Name collision or deletion of a non-empty gallery.
    Conflict,
    /// Gallery or image absent.
    NotFound,
    /// Image decode or encode failure.
    Editing,
    /// Unexpected filesystem fault.
    Internal,
}

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No gallery name was supplied on creation.
    #[error("gallery name is required")]
    MissingName,

    /// A gallery name given on creation is not a single path segment.
    #[error("invalid gallery name: {0}")]
    InvalidName(String),

    /// A gallery path parameter is not a single path segment.
    #[error("invalid gallery path: {0}")]
    InvalidPath(String),

    /// An image file name is not a single path segment.
    #[error("invalid image name: {0}")]
    InvalidImageName(String),

    /// An upload carried no image payload.
    #[error("no image file was provided")]
    MissingFile,

    /// A `{w}x{h}` dimension spec could not be parsed or is out of range.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Both requested dimensions resolved to auto.
    #[error("width and height cannot both be 0")]
    ZeroDimensions,

    /// A gallery with the same name already exists.
    #[error("gallery already exists: {0}")]
    AlreadyExists(String),

    /// The gallery still contains entries and cannot be deleted.
    #[error("gallery is not empty: {0}")]
    NotEmpty(String),

    /// The gallery does not exist.
    #[error("gallery not found: {0}")]
    GalleryNotFound(String),

    /// The image does not exist in its gallery.
    #[error("image {image} not found in gallery {gallery}")]
    ImageNotFound { gallery: String, image: String },

    /// The source image could not be decoded, resized or re-encoded.
    #[error("image {image} cannot be resized: {source}")]
    Editing {
        image: String,
        #[source]
        source: image::ImageError,
    },

    /// Any store failure that has no more specific meaning.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::MissingName
            | CoreError::InvalidName(_)
            | CoreError::InvalidPath(_)
            | CoreError::InvalidImageName(_)
            | CoreError::MissingFile
            | CoreError::InvalidDimensions(_)
            | CoreError::ZeroDimensions => ErrorKind::Validation,
            CoreError::AlreadyExists(_) | CoreError::NotEmpty(_) => ErrorKind::Conflict,
            CoreError::GalleryNotFound(_) | CoreError::ImageNotFound { .. } => ErrorKind::NotFound,
            CoreError::Editing { .. } => ErrorKind::Editing,
            CoreError::Store(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience alias used throughout `gallery-core`.
pub type CoreResult<T> = Result<T, CoreError>;
