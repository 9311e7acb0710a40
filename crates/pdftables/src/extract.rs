//! Document-level table extraction: detect, clean and collect every table.

use pdftables_core::{PdfError, TableSettings};

use crate::Pdf;

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionResult {
    pub tables: Vec<TableRecord>,
    /// True when any page had a detected table, even one whose rows were
    /// all dropped by cleaning.
    pub has_tables: bool,
    pub page_count: usize,
}

/// One detected table after cleaning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRecord {
    /// 1-based page number.
    pub page: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableRecord {
    /// Build a record from cleaned rows. The first row becomes the headers;
    /// a table with a single row repeats it as its only data row.
    ///
    /// Returns `None` when there are no rows.
    pub fn from_cleaned_rows(page: usize, cleaned: Vec<Vec<String>>) -> Option<Self> {
        let headers = cleaned.first()?.clone();
        let rows = if cleaned.len() > 1 {
            cleaned[1..].to_vec()
        } else {
            cleaned
        };
        Some(Self {
            page,
            headers,
            rows,
        })
    }
}

/// Replace missing cells with `""`, trim every cell and drop rows left
/// without any text.
pub fn clean_rows(raw: &[Vec<Option<String>>]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_deref().unwrap_or_default().trim().to_string())
                .collect::<Vec<String>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// Open the document at `path` and extract every table from every page.
///
/// # Errors
///
/// Returns [`PdfError`] if the file cannot be read or parsed, or if any
/// page's content cannot be interpreted. No partial result is returned.
pub fn extract(path: impl AsRef<std::path::Path>) -> Result<ExtractionResult, PdfError> {
    let pdf = Pdf::open_file(path)?;
    extract_from_pdf(&pdf)
}

/// Extract every table from an already opened document.
///
/// # Errors
///
/// Returns the first [`PdfError`] raised while interpreting a page.
pub fn extract_from_pdf(pdf: &Pdf) -> Result<ExtractionResult, PdfError> {
    let settings = TableSettings::default();
    let page_count = pdf.page_count();
    let mut tables = Vec::new();
    let mut has_tables = false;

    for (index, page) in pdf.pages_iter().enumerate() {
        let page = page?;
        let raw_tables = page.extract_tables(&settings);
        tracing::debug!(
            page = index + 1,
            tables = raw_tables.len(),
            "detected tables"
        );
        has_tables |= !raw_tables.is_empty();

        for raw in &raw_tables {
            let cleaned = clean_rows(raw);
            match TableRecord::from_cleaned_rows(index + 1, cleaned) {
                Some(record) => tables.push(record),
                None => tracing::debug!(page = index + 1, "skipping table without text"),
            }
        }
    }

    Ok(ExtractionResult {
        tables,
        has_tables,
        page_count,
    })
}
