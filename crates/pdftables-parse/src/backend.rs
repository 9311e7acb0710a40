//! PDF parsing backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts document access, so the
//! facade does not depend on a particular PDF library.

use pdftables_core::{PageSpace, PdfError};

use crate::handler::ContentHandler;

/// Trait abstracting PDF parsing operations.
///
/// A backend opens documents, resolves pages in page-tree order, reports
/// each page's coordinate frame, and interprets page content through a
/// [`ContentHandler`].
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let space = MyBackend::page_media_box(&doc, &page)?;
/// MyBackend::interpret_page(&doc, &page, &mut handler)?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// Backend-specific error type, convertible to [`PdfError`].
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable PDF, or if the
    /// document is encrypted and the empty password does not open it.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// The page's coordinate frame, from its (possibly inherited) MediaBox.
    ///
    /// # Errors
    ///
    /// Returns an error if the MediaBox entry exists but is malformed.
    fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<PageSpace, Self::Error>;

    /// Interpret the page's content streams, reporting glyphs and painted
    /// paths to `handler`.
    ///
    /// # Errors
    ///
    /// Returns an error if a content stream cannot be decoded.
    fn interpret_page(
        doc: &Self::Document,
        page: &Self::Page,
        handler: &mut dyn ContentHandler,
    ) -> Result<(), Self::Error>;
}
