use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors own the parsing step and hand back one string per page;
/// joining pages and writing the artifact lives in
/// [`crate::extract::extract_to_file`].
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page of `path`, in document order.
    ///
    /// `on_page(index, total)` is called after each page finishes. Any
    /// failure aborts the whole document; no partial result is returned.
    fn extract_pages(
        &self,
        path: &Path,
        on_page: &mut dyn FnMut(usize, usize),
    ) -> Result<Vec<String>, BackendError>;
}
