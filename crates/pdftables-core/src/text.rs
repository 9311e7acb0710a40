use crate::geometry::BBox;

/// A single rendered glyph, in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct Char {
    /// Decoded text; usually one scalar value, several for ligatures.
    pub text: String,
    pub bbox: BBox,
    /// Base font name, e.g. `Helvetica`.
    pub fontname: String,
    /// Effective font size in points.
    pub size: f64,
    /// False when the text matrix rotates or skews the glyph.
    pub upright: bool,
}

impl Char {
    /// Whether the glyph renders as whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}
