//! Text state tracked by the interpreter.
//!
//! Covers the text-state parameters set by `Tc Tw Tz TL Tf Ts`, and the text
//! and line matrices driven by `BT Tm Td TD T*` and glyph advances.

use pdftables_core::Ctm;

/// Text parameters saved and restored by `q`/`Q`.
///
/// The text and line matrices are not part of the graphics state and are
/// not captured.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStateSnapshot {
    pub char_spacing: f64,
    pub word_spacing: f64,
    pub h_scaling: f64,
    pub leading: f64,
    pub font_name: String,
    pub font_size: f64,
    pub rise: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    /// Character spacing (Tc), added after every glyph.
    pub char_spacing: f64,
    /// Word spacing (Tw), added after single-byte code 32.
    pub word_spacing: f64,
    /// Horizontal scaling (Tz) as a percentage, 100 = normal.
    pub h_scaling: f64,
    /// Leading (TL), used by `T*`, `'` and `"`.
    pub leading: f64,
    /// Font resource name selected by `Tf` (e.g. `F1`).
    pub font_name: String,
    pub font_size: f64,
    /// Text rise (Ts).
    pub rise: f64,
    text_matrix: Ctm,
    line_matrix: Ctm,
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextState {
    pub fn new() -> Self {
        Self {
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 100.0,
            leading: 0.0,
            font_name: String::new(),
            font_size: 0.0,
            rise: 0.0,
            text_matrix: Ctm::identity(),
            line_matrix: Ctm::identity(),
        }
    }

    pub fn text_matrix(&self) -> &Ctm {
        &self.text_matrix
    }

    /// Horizontal scaling as a fraction (1.0 = 100%).
    pub fn h_scaling_normalized(&self) -> f64 {
        self.h_scaling / 100.0
    }

    /// `BT`: reset both matrices to identity.
    pub fn begin_text(&mut self) {
        self.text_matrix = Ctm::identity();
        self.line_matrix = Ctm::identity();
    }

    /// `Tf`
    pub fn set_font(&mut self, font_name: String, font_size: f64) {
        self.font_name = font_name;
        self.font_size = font_size;
    }

    /// `Tm`: replace both matrices.
    pub fn set_text_matrix(&mut self, m: Ctm) {
        self.text_matrix = m;
        self.line_matrix = m;
    }

    /// `Td`: offset the start of the current line by `(tx, ty)`.
    pub fn move_text_position(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Ctm::translate(tx, ty).concat(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    /// `TD`: like `Td`, also setting the leading to `-ty`.
    pub fn move_text_position_and_set_leading(&mut self, tx: f64, ty: f64) {
        self.leading = -ty;
        self.move_text_position(tx, ty);
    }

    /// `T*`
    pub fn move_to_next_line(&mut self) {
        let leading = self.leading;
        self.move_text_position(0.0, -leading);
    }

    /// Move the text matrix along the baseline by `tx` text space units.
    pub fn advance_text_position(&mut self, tx: f64) {
        self.text_matrix = Ctm::translate(tx, 0.0).concat(&self.text_matrix);
    }

    pub fn save_snapshot(&self) -> TextStateSnapshot {
        TextStateSnapshot {
            char_spacing: self.char_spacing,
            word_spacing: self.word_spacing,
            h_scaling: self.h_scaling,
            leading: self.leading,
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            rise: self.rise,
        }
    }

    pub fn restore_snapshot(&mut self, snapshot: TextStateSnapshot) {
        self.char_spacing = snapshot.char_spacing;
        self.word_spacing = snapshot.word_spacing;
        self.h_scaling = snapshot.h_scaling;
        self.leading = snapshot.leading;
        self.font_name = snapshot.font_name;
        self.font_size = snapshot.font_size;
        self.rise = snapshot.rise;
    }
}
