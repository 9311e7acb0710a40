//! Top-level PDF document type for opening and reading pages.

use pdftables_core::{Char, PaintedPath, PdfError, Shapes};
use pdftables_parse::{
    CharEvent, ContentHandler, LopdfBackend, LopdfDocument, PathEvent, PdfBackend,
    char_from_event,
};

use crate::Page;

/// Iterator over pages of a PDF document, yielding each page on demand.
///
/// Created by [`Pdf::pages_iter()`]. Pages are interpreted lazily and not
/// retained after being yielded.
pub struct PagesIter<'a> {
    pdf: &'a Pdf,
    current: usize,
    count: usize,
}

impl Iterator for PagesIter<'_> {
    type Item = Result<Page, PdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.count {
            return None;
        }
        let result = self.pdf.page(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PagesIter<'_> {}

/// A PDF document opened for extraction.
///
/// # Example
///
/// ```ignore
/// let pdf = Pdf::open_file("report.pdf")?;
/// for page in pdf.pages_iter() {
///     let tables = page?.extract_tables(&TableSettings::default());
/// }
/// ```
pub struct Pdf {
    doc: LopdfDocument,
}

/// Collects content stream events for one page.
#[derive(Default)]
struct CollectingHandler {
    chars: Vec<CharEvent>,
    paths: Vec<PathEvent>,
}

impl ContentHandler for CollectingHandler {
    fn on_char(&mut self, event: CharEvent) {
        self.chars.push(event);
    }

    fn on_path_painted(&mut self, event: PathEvent) {
        self.paths.push(event);
    }
}

impl Pdf {
    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if the file cannot be read, or any error
    /// of [`Pdf::open`].
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, PdfError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read document");
        Self::open(&bytes)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PasswordRequired`] if the PDF is encrypted with a
    /// non-empty user password, and [`PdfError::ParseError`] if the bytes are
    /// not a valid PDF document.
    pub fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        let doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;
        Ok(Self { doc })
    }

    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Iterate over all pages in document order.
    pub fn pages_iter(&self) -> PagesIter<'_> {
        PagesIter {
            pdf: self,
            current: 0,
            count: self.page_count(),
        }
    }

    /// Interpret the page at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the index is out of range or content
    /// interpretation fails.
    pub fn page(&self, index: usize) -> Result<Page, PdfError> {
        let lopdf_page = LopdfBackend::get_page(&self.doc, index).map_err(PdfError::from)?;
        let space = LopdfBackend::page_media_box(&self.doc, &lopdf_page).map_err(PdfError::from)?;

        let mut handler = CollectingHandler::default();
        LopdfBackend::interpret_page(&self.doc, &lopdf_page, &mut handler)
            .map_err(PdfError::from)?;

        let chars: Vec<Char> = handler
            .chars
            .iter()
            .map(|event| char_from_event(event, &space))
            .collect();

        let mut shapes = Shapes::default();
        for event in &handler.paths {
            let painted = PaintedPath {
                path: event.path.clone(),
                stroke: event.paint_op.strokes(),
                fill: event.paint_op.fills(),
                line_width: event.line_width,
            };
            shapes.add_painted_path(&painted, &space);
        }

        tracing::debug!(
            page = index + 1,
            chars = chars.len(),
            lines = shapes.lines.len(),
            rects = shapes.rects.len(),
            "interpreted page"
        );
        Ok(Page::new(index, space.width(), space.height(), chars, shapes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_non_pdf() {
        let err = Pdf::open(b"%!PS-Adobe-3.0").err().unwrap();
        assert!(matches!(err, PdfError::ParseError(_)));
    }

    #[test]
    fn test_open_file_missing_is_io_error() {
        let err = Pdf::open_file("/nonexistent/dir/missing.pdf")
            .err()
            .unwrap();
        assert!(matches!(err, PdfError::IoError(_)));
    }
}
