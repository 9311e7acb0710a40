//! Page type for accessing extracted content from a PDF page.

use pdftables_core::{
    Char, Curve, Edge, Line, Rect, Shapes, Table, TableFinder, TableSettings, derive_edges,
};

/// A single interpreted page, in top-left origin page space.
pub struct Page {
    /// Page index (0-based).
    page_number: usize,
    width: f64,
    height: f64,
    chars: Vec<Char>,
    shapes: Shapes,
}

impl Page {
    pub fn new(
        page_number: usize,
        width: f64,
        height: f64,
        chars: Vec<Char>,
        shapes: Shapes,
    ) -> Self {
        Self {
            page_number,
            width,
            height,
            chars,
            shapes,
        }
    }

    /// Returns the page index (0-based).
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn chars(&self) -> &[Char] {
        &self.chars
    }

    pub fn lines(&self) -> &[Line] {
        &self.shapes.lines
    }

    pub fn rects(&self) -> &[Rect] {
        &self.shapes.rects
    }

    pub fn curves(&self) -> &[Curve] {
        &self.shapes.curves
    }

    /// Edges from every line, rect side and curve segment on the page.
    pub fn edges(&self) -> Vec<Edge> {
        derive_edges(&self.shapes)
    }

    /// Detect ruled tables on this page.
    pub fn find_tables(&self, settings: &TableSettings) -> Vec<Table> {
        TableFinder::new(self.edges(), settings.clone())
            .find_tables()
    }

    /// Detect tables and read their cell text, one grid per table.
    ///
    /// `None` marks a grid slot not covered by any cell.
    pub fn extract_tables(&self, settings: &TableSettings) -> Vec<Vec<Vec<Option<String>>>> {
        let options = settings.word_options();
        self.find_tables(settings)
            .iter()
            .map(|table| table.extract(&self.chars, &options))
            .collect()
    }
}
