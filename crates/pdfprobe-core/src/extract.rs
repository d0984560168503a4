use std::path::PathBuf;

use crate::CoreError;
use crate::backend::{BackendError, PdfBackend};
use crate::store::FileStore;

/// Input PDF and output text file of an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub input: PathBuf,
    pub output_path: PathBuf,
}

/// What was written by a successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    pub pages: usize,
    pub bytes: usize,
}

/// Concatenate page texts in order, each followed by a newline.
///
/// Zero pages yields an empty string.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let capacity = pages.iter().map(|p| p.as_ref().len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// Extract the text of `config.input` and write it to `config.output_path`.
///
/// All or nothing: the output is only written once every page extracted
/// cleanly, so a parse failure leaves any previous output untouched. I/O
/// failures on the input are classified like the comparator's
/// ([`CoreError::NotFound`], [`CoreError::PermissionDenied`]).
pub fn extract_to_file(
    backend: &dyn PdfBackend,
    store: &dyn FileStore,
    config: &ExtractConfig,
    on_page: &mut dyn FnMut(usize, usize),
) -> Result<Extraction, CoreError> {
    let pages = backend
        .extract_pages(&config.input, on_page)
        .map_err(|source| match source {
            BackendError::Io(e) => CoreError::from_io(&config.input, e),
            source => CoreError::Backend {
                path: config.input.clone(),
                source,
            },
        })?;
    let text = join_pages(&pages);

    store.write(&config.output_path, text.as_bytes())?;
    tracing::info!(
        input = %config.input.display(),
        output = %config.output_path.display(),
        pages = pages.len(),
        "extracted text"
    );

    Ok(Extraction {
        pages: pages.len(),
        bytes: text.len(),
    })
}
