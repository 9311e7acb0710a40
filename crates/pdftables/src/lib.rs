//! pdftables: find ruled tables in PDF documents and extract their text.
//!
//! This is the public API facade. It re-exports types from pdftables-core
//! and uses pdftables-parse for PDF reading and interpretation.
//!
//! # Architecture
//!
//! - **pdftables-core**: backend-independent geometry, shapes and table finder
//! - **pdftables-parse**: lopdf backend and content stream interpreter
//! - **pdftables** (this crate): [`Pdf`], [`Page`] and the [`extract`] operation

mod extract;
mod page;
mod pdf;

pub use extract::{ExtractionResult, TableRecord, clean_rows, extract, extract_from_pdf};
pub use page::Page;
pub use pdf::{PagesIter, Pdf};

pub use pdftables_core;
pub use pdftables_core::{BBox, Char, Edge, Line, PdfError, Rect, Table, TableSettings};
pub use pdftables_parse;
