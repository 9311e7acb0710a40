//! Content handler callback trait for content stream interpretation.
//!
//! The interpreter calls [`ContentHandler`] methods as it processes page
//! content; the handler turns those events into page objects.

use pdftables_core::Path;

/// The type of paint operation applied to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOp {
    /// Path is stroked (outlined).
    Stroke,
    /// Path is filled.
    Fill,
    /// Path is both filled and stroked.
    FillAndStroke,
}

impl PaintOp {
    pub fn strokes(self) -> bool {
        matches!(self, PaintOp::Stroke | PaintOp::FillAndStroke)
    }

    pub fn fills(self) -> bool {
        matches!(self, PaintOp::Fill | PaintOp::FillAndStroke)
    }
}

/// Information about a rendered character glyph.
///
/// Carries everything needed to place the glyph on the page: the text
/// rendering parameters, both matrices and the font's descent.
#[derive(Debug, Clone, PartialEq)]
pub struct CharEvent {
    /// The character code from the content stream string.
    pub char_code: u32,
    /// Decoded text, if the font's encoding maps the code.
    pub unicode: Option<String>,
    /// Base font name (e.g., "Helvetica").
    pub font_name: String,
    /// Font size in text space units.
    pub font_size: f64,
    /// Text matrix at the time of rendering.
    pub text_matrix: [f64; 6],
    /// Current transformation matrix at the time of rendering.
    pub ctm: [f64; 6],
    /// Glyph width in glyph space units (1/1000 of text space).
    pub displacement: f64,
    /// Horizontal scaling as a fraction (100% = 1.0).
    pub h_scaling: f64,
    /// Text rise (Ts).
    pub rise: f64,
    /// Font descent in glyph space units (negative below the baseline).
    pub descent: f64,
}

/// Information about a painted path.
///
/// Path coordinates are already transformed to PDF user space by the CTM
/// in effect when each segment was constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEvent {
    pub path: Path,
    pub paint_op: PaintOp,
    /// Stroke line width.
    pub line_width: f64,
}

/// Callback handler for content stream interpretation.
///
/// Both methods default to no-ops so handlers only subscribe to what they
/// care about.
pub trait ContentHandler {
    /// Called when a character glyph is rendered.
    fn on_char(&mut self, _event: CharEvent) {}

    /// Called when a path is painted (stroked, filled, or both).
    fn on_path_painted(&mut self, _event: PathEvent) {}
}
