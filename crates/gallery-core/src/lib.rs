//! Gallery core library: a directory tree exposed as galleries and images.
//!
//! `gallery-core` maps a resource model onto a local directory tree
//! `root/<gallery>/<image>`. It knows nothing about HTTP so that any
//! frontend can drive it.
//!
//! # Modules
//!
//! - [`fs`]: the filesystem store ([`FsStore`]) and validated paths ([`StorePath`]).
//! - [`galleries`]: gallery listing, creation and deletion ([`GalleryRepository`]).
//! - [`images`]: image listing, upload, read and deletion ([`ImageRepository`]).
//! - [`resize`]: on-demand JPEG derivatives ([`ResizeService`]).
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).
//!
//! All operations are synchronous; async callers should run them on a
//! blocking thread.

pub mod error;
pub mod fs;
pub mod galleries;
pub mod images;
pub mod resize;

pub use error::{CoreError, CoreResult, ErrorKind};
pub use fs::{FsStore, StorePath};
pub use galleries::{Gallery, GalleryRepository};
pub use images::{logical_name, Image, ImageRepository, Upload};
pub use resize::{Derivative, Dimensions, Extent, ResizeService};
