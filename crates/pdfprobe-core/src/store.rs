//! File access seam used by the comparator and extractor.
//!
//! [`LocalFs`] is what the binary uses. [`MemoryStore`] keeps files in a map
//! and counts content reads, so the comparison rules can be checked without
//! touching the disk.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::CoreError;

pub trait FileStore {
    /// Byte length of `path`, without reading its contents.
    fn len(&self, path: &Path) -> Result<u64, CoreError>;

    /// Full contents of `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>, CoreError>;

    /// Replace the contents of `path` with `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), CoreError>;
}

/// The local file system.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the destination, so readers never observe a half-written
/// artifact. A read-only destination is refused, an existing file keeps its
/// permissions, and symlinks are written through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileStore for LocalFs {
    fn len(&self, path: &Path) -> Result<u64, CoreError> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| CoreError::from_io(path, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, CoreError> {
        std::fs::read(path).map_err(|e| CoreError::from_io(path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), CoreError> {
        // Write through symlinks and keep an existing file's mode.
        let target = match std::fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                std::fs::canonicalize(path).map_err(|e| CoreError::from_io(path, e))?
            }
            _ => path.to_path_buf(),
        };
        let existing = match std::fs::metadata(&target) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(CoreError::from_io(path, e)),
        };
        if existing.as_ref().is_some_and(|p| p.readonly()) {
            return Err(CoreError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = temp_builder()
            .tempfile_in(dir)
            .map_err(|e| CoreError::from_io(path, e))?;
        tmp.write_all(contents)
            .and_then(|_| tmp.flush())
            .map_err(|e| CoreError::from_io(path, e))?;
        if let Some(perms) = existing {
            tmp.as_file()
                .set_permissions(perms)
                .map_err(|e| CoreError::from_io(path, e))?;
        }
        tmp.persist(&target)
            .map_err(|e| CoreError::from_io(path, e.error))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }
}

/// Temp files start out as a plain create would: 0666 minus the umask.
#[cfg(unix)]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

/// In-memory [`FileStore`] that records how often contents were read.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    read_only: HashSet<PathBuf>,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), contents.into());
        }
        self
    }

    /// Make every write to `path` fail with a permission error.
    pub fn with_read_only(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_only.insert(path.into());
        self
    }

    /// Number of [`FileStore::read`] calls so far, successful or not.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Current contents of `path`, if present.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    fn lookup(&self, path: &Path) -> Result<Vec<u8>, CoreError> {
        let files = self
            .files
            .lock()
            .map_err(|_| CoreError::from_io(path, io::Error::other("store lock poisoned")))?;
        files.get(path).cloned().ok_or_else(|| CoreError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

impl FileStore for MemoryStore {
    fn len(&self, path: &Path) -> Result<u64, CoreError> {
        self.lookup(path).map(|c| c.len() as u64)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, CoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.lookup(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), CoreError> {
        if self.read_only.contains(path) {
            return Err(CoreError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        let mut files = self
            .files
            .lock()
            .map_err(|_| CoreError::from_io(path, io::Error::other("store lock poisoned")))?;
        files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
