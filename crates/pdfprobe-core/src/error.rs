use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::BackendError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },
    #[error("IO error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not extract text from {}", path.display())]
    Backend {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl CoreError {
    /// Classify an I/O failure on `path` by its [`io::ErrorKind`].
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CoreError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => CoreError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => CoreError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// The path the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            CoreError::NotFound { path }
            | CoreError::PermissionDenied { path }
            | CoreError::Io { path, .. }
            | CoreError::Backend { path, .. } => path,
        }
    }
}
