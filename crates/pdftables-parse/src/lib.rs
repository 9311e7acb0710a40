//! pdftables-parse: PDF parsing backend and content stream interpreter.
//!
//! Opens documents through a pluggable [`PdfBackend`] (lopdf by default),
//! interprets page content streams and reports glyphs and painted paths to a
//! [`ContentHandler`]. It depends on pdftables-core for shared data types.

pub mod backend;
pub mod char_extraction;
pub mod error;
mod font;
pub mod font_metrics;
pub mod handler;
mod interpreter;
pub mod interpreter_state;
pub mod lopdf_backend;
mod standard_fonts;
pub mod text_state;

pub use backend::PdfBackend;
pub use char_extraction::char_from_event;
pub use error::BackendError;
pub use font_metrics::FontMetrics;
pub use handler::{CharEvent, ContentHandler, PaintOp, PathEvent};
pub use interpreter_state::InterpreterState;
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use pdftables_core;
pub use text_state::TextState;
