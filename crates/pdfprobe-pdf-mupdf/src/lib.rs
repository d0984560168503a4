use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pdfprobe_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the comparison path does not transitively
/// depend on it.
///
/// Each page's text is its lines joined by `\n`, in MuPDF's block order.
/// Header and footer bands can optionally be dropped; both are off by
/// default so the dump contains everything on the page.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    fn page_text(&self, page: &mupdf::Page) -> Result<String, BackendError> {
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::Extraction(e.to_string()))?;

        let page_bounds = page
            .bounds()
            .map_err(|e| BackendError::Extraction(e.to_string()))?;
        let page_height = page_bounds.y1 - page_bounds.y0;

        let header_threshold = self
            .header_exclusion_ratio
            .map(|r| page_bounds.y0 + page_height * r);
        let footer_threshold = self
            .footer_exclusion_ratio
            .map(|r| page_bounds.y1 - page_height * r);

        let mut lines = Vec::new();
        for block in text_page.blocks() {
            let block_bounds = block.bounds();

            if let Some(threshold) = header_threshold
                && block_bounds.y1 <= threshold
            {
                continue;
            }
            if let Some(threshold) = footer_threshold
                && block_bounds.y0 >= threshold
            {
                continue;
            }

            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                lines.push(line_text);
            }
        }
        Ok(lines.join("\n"))
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(
        &self,
        path: &Path,
        on_page: &mut dyn FnMut(usize, usize),
    ) -> Result<Vec<String>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::Open("invalid path encoding".into()))?;

        // Surface missing or unreadable input as an I/O error rather than
        // an opaque MuPDF open failure.
        drop(std::fs::File::open(path)?);

        let document = Document::open(path_str).map_err(|e| BackendError::Open(e.to_string()))?;
        let total = document
            .page_count()
            .map_err(|e| BackendError::Open(e.to_string()))?
            .max(0) as usize;
        tracing::debug!(path = %path.display(), pages = total, "opened PDF");

        let mut pages_text = Vec::with_capacity(total);
        for (index, page_result) in document
            .pages()
            .map_err(|e| BackendError::Extraction(e.to_string()))?
            .enumerate()
        {
            let page = page_result.map_err(|e| BackendError::Extraction(e.to_string()))?;
            pages_text.push(self.page_text(&page)?);
            on_page(index, total);
        }

        Ok(pages_text)
    }
}
