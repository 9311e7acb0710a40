//! Edges derived from lines, rect sides and curve segments.
//!
//! Edges are the raw material of the table finder: only horizontal and
//! vertical ones can bound a cell.

use crate::geometry::{Orientation, Point};
use crate::shapes::{Curve, Line, Rect, Shapes};

/// Which primitive an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    Line,
    RectTop,
    RectBottom,
    RectLeft,
    RectRight,
    /// One segment between consecutive curve points.
    Curve,
}

/// A segment in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
    pub orientation: Orientation,
    pub source: EdgeSource,
}

impl Edge {
    /// Length along the edge's own axis.
    pub fn length(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.x1 - self.x0,
            Orientation::Vertical => self.bottom - self.top,
            Orientation::Diagonal => {
                let dx = self.x1 - self.x0;
                let dy = self.bottom - self.top;
                (dx * dx + dy * dy).sqrt()
            }
        }
    }
}

pub fn edge_from_line(line: &Line) -> Edge {
    Edge {
        x0: line.x0,
        top: line.top,
        x1: line.x1,
        bottom: line.bottom,
        orientation: line.orientation,
        source: EdgeSource::Line,
    }
}

/// The four sides of a rect: top, bottom, left, right.
pub fn edges_from_rect(rect: &Rect) -> [Edge; 4] {
    let h = |y, source| Edge {
        x0: rect.x0,
        top: y,
        x1: rect.x1,
        bottom: y,
        orientation: Orientation::Horizontal,
        source,
    };
    let v = |x, source| Edge {
        x0: x,
        top: rect.top,
        x1: x,
        bottom: rect.bottom,
        orientation: Orientation::Vertical,
        source,
    };
    [
        h(rect.top, EdgeSource::RectTop),
        h(rect.bottom, EdgeSource::RectBottom),
        v(rect.x0, EdgeSource::RectLeft),
        v(rect.x1, EdgeSource::RectRight),
    ]
}

fn segment_edge(a: Point, b: Point) -> Edge {
    Edge {
        x0: a.x.min(b.x),
        top: a.y.min(b.y),
        x1: a.x.max(b.x),
        bottom: a.y.max(b.y),
        orientation: Orientation::of_segment(a, b),
        source: EdgeSource::Curve,
    }
}

/// One edge per pair of consecutive points.
pub fn edges_from_curve(curve: &Curve) -> Vec<Edge> {
    curve
        .pts
        .windows(2)
        .map(|w| segment_edge(w[0], w[1]))
        .collect()
}

/// All edges of a page: lines first, then rect sides, then curve segments.
pub fn derive_edges(shapes: &Shapes) -> Vec<Edge> {
    let mut edges: Vec<Edge> = shapes.lines.iter().map(edge_from_line).collect();
    edges.extend(shapes.rects.iter().flat_map(edges_from_rect));
    edges.extend(shapes.curves.iter().flat_map(edges_from_curve));
    edges
}
