//! Graphics state stack for the content stream interpreter.
//!
//! Implements the part of the PDF graphics state model table detection
//! needs: the CTM (`cm`), the line width (`w`), and the `q`/`Q` stack, which
//! also carries the text-state parameters.

use pdftables_core::Ctm;

use crate::text_state::TextStateSnapshot;

#[derive(Debug, Clone)]
struct SavedState {
    ctm: Ctm,
    line_width: f64,
    text: TextStateSnapshot,
}

/// Interpreter-level graphics state.
#[derive(Debug, Clone)]
pub struct InterpreterState {
    ctm: Ctm,
    line_width: f64,
    stack: Vec<SavedState>,
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterState {
    pub fn new() -> Self {
        Self::with_ctm(Ctm::identity())
    }

    /// Start from a given CTM, e.g. a page-level transform.
    pub fn with_ctm(ctm: Ctm) -> Self {
        Self {
            ctm,
            line_width: 1.0,
            stack: Vec::new(),
        }
    }

    pub fn ctm(&self) -> &Ctm {
        &self.ctm
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// `q`: push the current state along with the text-state parameters.
    pub fn save_state(&mut self, text: TextStateSnapshot) {
        self.stack.push(SavedState {
            ctm: self.ctm,
            line_width: self.line_width,
            text,
        });
    }

    /// `Q`: pop the most recently saved state.
    ///
    /// Returns the saved text-state parameters, or `None` for an unbalanced
    /// `Q`, which leaves the state untouched.
    pub fn restore_state(&mut self) -> Option<TextStateSnapshot> {
        let saved = self.stack.pop()?;
        self.ctm = saved.ctm;
        self.line_width = saved.line_width;
        Some(saved.text)
    }

    /// `cm`: pre-multiply the CTM, `CTM' = m × CTM`.
    pub fn concat_matrix(&mut self, m: &Ctm) {
        self.ctm = m.concat(&self.ctm);
    }

    /// `w`
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }
}
