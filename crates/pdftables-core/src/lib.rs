//! pdftables-core: Backend-independent data types and algorithms.
//!
//! This crate provides the page-space geometry, the shapes and edges derived
//! from painted paths, text grouping, and the ruling-line table finder used by
//! pdftables. It has no external dependencies.

mod cluster;
pub mod edges;
pub mod error;
pub mod geometry;
pub mod path;
pub mod shapes;
pub mod table;
pub mod text;
pub mod words;

pub use edges::{Edge, EdgeSource, derive_edges};
pub use error::PdfError;
pub use geometry::{BBox, Ctm, Orientation, PageSpace, Point};
pub use path::{PaintedPath, Path, PathBuilder, PathSegment};
pub use shapes::{Curve, Line, Rect, Shapes};
pub use table::{Table, TableFinder, TableRow, TableSettings};
pub use text::Char;
pub use words::{WordExtractor, WordOptions};
