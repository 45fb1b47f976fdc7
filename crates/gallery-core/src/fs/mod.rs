//! Filesystem store for the gallery tree.
//!
//! Everything below the store root is addressed with a [`StorePath`], a
//! relative path whose segments have been validated one by one. The
//! [`FsStore`] primitives only accept `StorePath` values, so a request can
//! never name a location outside the root.

pub mod entry;
pub mod path;
pub mod store;

pub use entry::{nfc_name, StoreEntry};
pub use path::{validate_segment, SegmentError, StorePath};
pub use store::{FsStore, StoreError, StoreResult};
