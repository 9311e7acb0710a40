//! Path construction from PDF path operators.
//!
//! Coordinates are transformed through the CTM as they are appended, so a
//! finished [`Path`] lives in PDF user space (bottom-left origin).

use crate::geometry::{Ctm, Point};

/// A segment of a PDF path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath.
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier curve.
    CurveTo { cp1: Point, cp2: Point, end: Point },
    /// Close the current subpath.
    ClosePath,
}

/// A complete path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Split into subpaths, each starting at a `MoveTo`.
    ///
    /// Segments before the first `MoveTo` have no start point and are dropped.
    pub fn subpaths(&self) -> Vec<&[PathSegment]> {
        let mut subpaths = Vec::new();
        let mut start: Option<usize> = None;

        for (i, seg) in self.segments.iter().enumerate() {
            if matches!(seg, PathSegment::MoveTo(_)) {
                if let Some(s) = start {
                    subpaths.push(&self.segments[s..i]);
                }
                start = Some(i);
            }
        }
        if let Some(s) = start {
            subpaths.push(&self.segments[s..]);
        }

        subpaths
    }
}

/// A path together with how it was painted.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedPath {
    pub path: Path,
    pub stroke: bool,
    pub fill: bool,
    /// Stroke width in user space units, as set by `w`.
    pub line_width: f64,
}

/// Accumulates path operators until a painting operator consumes the path.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
    current_point: Option<Point>,
    subpath_start: Option<Point>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `m`
    pub fn move_to(&mut self, ctm: &Ctm, x: f64, y: f64) {
        let p = ctm.transform_point(Point::new(x, y));
        self.segments.push(PathSegment::MoveTo(p));
        self.current_point = Some(p);
        self.subpath_start = Some(p);
    }

    /// `l`. Without a current point the segment starts a new subpath instead.
    pub fn line_to(&mut self, ctm: &Ctm, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.move_to(ctm, x, y);
            return;
        }
        let p = ctm.transform_point(Point::new(x, y));
        self.segments.push(PathSegment::LineTo(p));
        self.current_point = Some(p);
    }

    /// `c`
    pub fn curve_to(&mut self, ctm: &Ctm, pts: [f64; 6]) {
        if self.current_point.is_none() {
            return;
        }
        let [x1, y1, x2, y2, x3, y3] = pts;
        let cp1 = ctm.transform_point(Point::new(x1, y1));
        let cp2 = ctm.transform_point(Point::new(x2, y2));
        let end = ctm.transform_point(Point::new(x3, y3));
        self.segments.push(PathSegment::CurveTo { cp1, cp2, end });
        self.current_point = Some(end);
    }

    /// `v`: the first control point is the current point.
    pub fn curve_to_v(&mut self, ctm: &Ctm, pts: [f64; 4]) {
        let Some(cp1) = self.current_point else {
            return;
        };
        let [x2, y2, x3, y3] = pts;
        let cp2 = ctm.transform_point(Point::new(x2, y2));
        let end = ctm.transform_point(Point::new(x3, y3));
        self.segments.push(PathSegment::CurveTo { cp1, cp2, end });
        self.current_point = Some(end);
    }

    /// `y`: the second control point is the end point.
    pub fn curve_to_y(&mut self, ctm: &Ctm, pts: [f64; 4]) {
        if self.current_point.is_none() {
            return;
        }
        let [x1, y1, x3, y3] = pts;
        let cp1 = ctm.transform_point(Point::new(x1, y1));
        let end = ctm.transform_point(Point::new(x3, y3));
        self.segments.push(PathSegment::CurveTo { cp1, cp2: end, end });
        self.current_point = Some(end);
    }

    /// `h`
    pub fn close_path(&mut self) {
        if self.current_point.is_none() {
            return;
        }
        self.segments.push(PathSegment::ClosePath);
        self.current_point = self.subpath_start;
    }

    /// `re`: moveto + three linetos + closepath.
    pub fn rectangle(&mut self, ctm: &Ctm, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(ctm, x, y);
        self.line_to(ctm, x + width, y);
        self.line_to(ctm, x + width, y + height);
        self.line_to(ctm, x, y + height);
        self.close_path();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Hand the accumulated path to a painting operator and start over.
    pub fn take(&mut self) -> Path {
        self.current_point = None;
        self.subpath_start = None;
        Path {
            segments: std::mem::take(&mut self.segments),
        }
    }
}
