//! Filesystem primitives rooted at a fixed directory.

use std::io;
use std::path::{Path, PathBuf};

use crate::fs::entry::StoreEntry;
use crate::fs::path::StorePath;

/// Failure of a single store primitive.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The target (or, for writes, its parent directory) does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The target already exists.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A directory still has entries.
    #[error("directory not empty: {0}")]
    NotEmpty(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A regular file was expected but the path points to something else.
    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    /// An I/O error that doesn't fit a more specific variant.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

fn map_io(path: &Path, e: io::Error) -> StoreError {
    match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_path_buf()),
        io::ErrorKind::DirectoryNotEmpty => StoreError::NotEmpty(path.to_path_buf()),
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// The on-disk tree `root/<gallery>/<image>`.
///
/// Cloning is cheap; every clone addresses the same root. Symbolic links are
/// never followed: they are skipped in listings and treated as absent by the
/// file primitives.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory (and its parents) if it does not exist.
    pub fn ensure_root(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| map_io(&self.root, e))
    }

    fn absolute(&self, path: &StorePath) -> PathBuf {
        self.root.join(path.to_relative())
    }

    /// Lists the immediate entries of a directory, unsorted.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the directory does not exist.
    /// - [`StoreError::NotADirectory`] if the path is not a directory.
    pub fn list_entries(&self, dir: &StorePath) -> StoreResult<Vec<StoreEntry>> {
        let abs = self.absolute(dir);
        let meta = std::fs::symlink_metadata(&abs).map_err(|e| map_io(&abs, e))?;
        if !meta.is_dir() {
            return Err(StoreError::NotADirectory(abs));
        }

        let read_dir = std::fs::read_dir(&abs).map_err(|e| map_io(&abs, e))?;
        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            // file_type() does not follow symlinks
            match dir_entry.file_type() {
                Ok(ft) if ft.is_symlink() => continue,
                Ok(_) => {}
                Err(_) => continue,
            }
            let metadata = match dir_entry.metadata() {
                Ok(m) => m,
                Err(_) => continue,
            };
            let name = dir_entry.file_name();
            entries.push(StoreEntry::new(&name.to_string_lossy(), &metadata));
        }
        Ok(entries)
    }

    /// Returns metadata for a single path.
    pub fn stat(&self, path: &StorePath) -> StoreResult<StoreEntry> {
        let abs = self.absolute(path);
        let meta = std::fs::symlink_metadata(&abs).map_err(|e| map_io(&abs, e))?;
        if meta.file_type().is_symlink() {
            return Err(StoreError::NotFound(abs));
        }
        Ok(StoreEntry::new(path.file_name().unwrap_or_default(), &meta))
    }

    /// Creates a single directory. Fails with [`StoreError::AlreadyExists`]
    /// if anything already occupies the path; the OS guarantees only one of
    /// several concurrent callers succeeds.
    pub fn create_directory(&self, path: &StorePath) -> StoreResult<()> {
        let abs = self.absolute(path);
        std::fs::create_dir(&abs).map_err(|e| map_io(&abs, e))
    }

    /// Removes an empty directory.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the directory does not exist.
    /// - [`StoreError::NotADirectory`] if the path is not a directory.
    /// - [`StoreError::NotEmpty`] if the directory has any entry.
    pub fn delete_directory(&self, path: &StorePath) -> StoreResult<()> {
        let abs = self.absolute(path);
        let meta = std::fs::symlink_metadata(&abs).map_err(|e| map_io(&abs, e))?;
        if !meta.is_dir() {
            return Err(StoreError::NotADirectory(abs));
        }
        let mut read_dir = std::fs::read_dir(&abs).map_err(|e| map_io(&abs, e))?;
        if read_dir.next().is_some() {
            return Err(StoreError::NotEmpty(abs));
        }
        std::fs::remove_dir(&abs).map_err(|e| map_io(&abs, e))
    }

    /// Removes a regular file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if nothing exists at the path.
    /// - [`StoreError::NotAFile`] if the path is a directory.
    pub fn delete_file(&self, path: &StorePath) -> StoreResult<()> {
        let abs = self.absolute(path);
        let meta = std::fs::symlink_metadata(&abs).map_err(|e| map_io(&abs, e))?;
        if meta.is_dir() {
            return Err(StoreError::NotAFile(abs));
        }
        std::fs::remove_file(&abs).map_err(|e| map_io(&abs, e))
    }

    /// Reads a whole regular file.
    pub fn read_file(&self, path: &StorePath) -> StoreResult<Vec<u8>> {
        let abs = self.absolute(path);
        let meta = std::fs::symlink_metadata(&abs).map_err(|e| map_io(&abs, e))?;
        if meta.file_type().is_symlink() {
            return Err(StoreError::NotFound(abs));
        }
        if !meta.is_file() {
            return Err(StoreError::NotAFile(abs));
        }
        std::fs::read(&abs).map_err(|e| map_io(&abs, e))
    }

    /// Writes `bytes` to a file, replacing any previous content.
    ///
    /// Fails with [`StoreError::NotFound`] when the parent directory is
    /// missing. The file handle is closed before this returns.
    pub fn write_file(&self, path: &StorePath, bytes: &[u8]) -> StoreResult<()> {
        let abs = self.absolute(path);
        if let Ok(meta) = std::fs::symlink_metadata(&abs) {
            if meta.is_dir() || meta.file_type().is_symlink() {
                return Err(StoreError::NotAFile(abs));
            }
        }
        std::fs::write(&abs, bytes).map_err(|e| map_io(&abs, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FsStore) {
        let tmp = TempDir::new().unwrap();
        let store = FsStore::new(tmp.path());
        (tmp, store)
    }

    fn p(segments: &[&str]) -> StorePath {
        segments
            .iter()
            .fold(StorePath::root(), |acc, s| acc.join(s).unwrap())
    }

    #[test]
    fn ensure_root_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FsStore::new(tmp.path().join("gallery"));

        store.ensure_root().unwrap();
        store.ensure_root().unwrap();

        assert!(tmp.path().join("gallery").is_dir());
    }

    #[test]
    fn list_entries_returns_files_and_directories() {
        let (tmp, store) = setup();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();
        fs::write(tmp.path().join("stray.txt"), "x").unwrap();

        let entries = store.list_entries(&StorePath::root()).unwrap();

        assert_eq!(entries.len(), 2);
        let zoo = entries.iter().find(|e| e.name() == "Zoo").unwrap();
        assert!(zoo.is_dir());
    }

    #[test]
    fn list_entries_missing_directory_is_not_found() {
        let (_tmp, store) = setup();
        let result = store.list_entries(&p(&["nope"]));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn list_entries_on_file_is_not_a_directory() {
        let (tmp, store) = setup();
        fs::write(tmp.path().join("file"), "x").unwrap();
        let result = store.list_entries(&p(&["file"]));
        assert!(matches!(result, Err(StoreError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn list_entries_skips_symlinks() {
        let (tmp, store) = setup();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("escape")).unwrap();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();

        let entries = store.list_entries(&StorePath::root()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "Zoo");
    }

    #[test]
    fn create_directory_twice_fails_with_already_exists() {
        let (tmp, store) = setup();
        store.create_directory(&p(&["Zoo"])).unwrap();

        let result = store.create_directory(&p(&["Zoo"]));

        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        assert!(tmp.path().join("Zoo").is_dir());
    }

    #[test]
    fn delete_directory_refuses_non_empty() {
        let (tmp, store) = setup();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();
        fs::write(tmp.path().join("Zoo").join("cat.png"), "x").unwrap();

        let result = store.delete_directory(&p(&["Zoo"]));

        assert!(matches!(result, Err(StoreError::NotEmpty(_))));
        assert!(tmp.path().join("Zoo").join("cat.png").exists());
    }

    #[test]
    fn delete_directory_removes_empty() {
        let (tmp, store) = setup();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();

        store.delete_directory(&p(&["Zoo"])).unwrap();

        assert!(!tmp.path().join("Zoo").exists());
    }

    #[test]
    fn delete_directory_missing_is_not_found() {
        let (_tmp, store) = setup();
        let result = store.delete_directory(&p(&["Zoo"]));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_file_on_directory_is_rejected() {
        let (tmp, store) = setup();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();

        let result = store.delete_file(&p(&["Zoo"]));

        assert!(matches!(result, Err(StoreError::NotAFile(_))));
        assert!(tmp.path().join("Zoo").is_dir());
    }

    #[test]
    fn delete_file_missing_is_not_found() {
        let (_tmp, store) = setup();
        let result = store.delete_file(&p(&["ghost.png"]));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn write_then_read_is_byte_identical() {
        let (tmp, store) = setup();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

        store.write_file(&p(&["Zoo", "blob.bin"]), &bytes).unwrap();

        assert_eq!(store.read_file(&p(&["Zoo", "blob.bin"])).unwrap(), bytes);
    }

    #[test]
    fn write_overwrites_existing_file() {
        let (tmp, store) = setup();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();
        store.write_file(&p(&["Zoo", "a"]), b"first").unwrap();

        store.write_file(&p(&["Zoo", "a"]), b"second").unwrap();

        assert_eq!(fs::read(tmp.path().join("Zoo").join("a")).unwrap(), b"second");
    }

    #[test]
    fn write_into_missing_parent_is_not_found() {
        let (_tmp, store) = setup();
        let result = store.write_file(&p(&["Nope", "cat.png"]), b"x");
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn stat_reports_file_metadata() {
        let (tmp, store) = setup();
        fs::write(tmp.path().join("cat.png"), "x").unwrap();

        let entry = store.stat(&p(&["cat.png"])).unwrap();

        assert_eq!(entry.name(), "cat.png");
        assert!(!entry.is_dir());
        assert!(entry.modified().is_some());
    }
}
