//! Line, Rect and Curve extraction from painted paths.
//!
//! Each subpath of a painted path becomes exactly one shape:
//! a single straight segment is a [`Line`], an axis-aligned quadrilateral is a
//! [`Rect`], and anything else is a [`Curve`] carrying its point sequence.
//! Fill and stroke do not matter; thin filled rectangles are a common way to
//! draw table rules.

use crate::geometry::{BBox, Orientation, PageSpace, Point};
use crate::path::{PaintedPath, PathSegment};

/// A straight segment, in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
    pub line_width: f64,
    pub orientation: Orientation,
}

/// An axis-aligned rectangle, in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
    pub line_width: f64,
    pub stroke: bool,
    pub fill: bool,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Any other subpath: polylines, Bezier curves (control points included).
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Points in drawing order, in page space.
    pub pts: Vec<Point>,
}

/// Shapes extracted from one or more painted paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shapes {
    pub lines: Vec<Line>,
    pub rects: Vec<Rect>,
    pub curves: Vec<Curve>,
}

const POINT_TOLERANCE: f64 = 1e-6;

fn same_point(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < POINT_TOLERANCE && (a.y - b.y).abs() < POINT_TOLERANCE
}

/// Bounding box of four points if consecutive points share an x or a y.
fn axis_aligned_quad(pts: &[Point]) -> Option<BBox> {
    if pts.len() != 4 {
        return None;
    }
    for i in 0..4 {
        let a = pts[i];
        let b = pts[(i + 1) % 4];
        if (b.x - a.x).abs() > POINT_TOLERANCE && (b.y - a.y).abs() > POINT_TOLERANCE {
            return None;
        }
    }
    BBox::from_points(pts)
}

struct Outline {
    pts: Vec<Point>,
    closed: bool,
    curved: bool,
}

fn outline(subpath: &[PathSegment], space: &PageSpace) -> Outline {
    let mut out = Outline {
        pts: Vec::with_capacity(subpath.len()),
        closed: false,
        curved: false,
    };
    for seg in subpath {
        match seg {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => out.pts.push(space.to_page(*p)),
            PathSegment::CurveTo { cp1, cp2, end } => {
                out.curved = true;
                out.pts.extend([cp1, cp2, end].map(|p| space.to_page(*p)));
            }
            PathSegment::ClosePath => out.closed = true,
        }
    }
    out
}

impl Shapes {
    /// Classify every subpath of `painted` and append the result.
    pub fn add_painted_path(&mut self, painted: &PaintedPath, space: &PageSpace) {
        for subpath in painted.path.subpaths() {
            let Outline { pts, closed, curved } = outline(subpath, space);
            if pts.len() < 2 {
                continue;
            }

            if !curved {
                if pts.len() == 2 && !closed {
                    let (a, b) = (pts[0], pts[1]);
                    self.lines.push(Line {
                        x0: a.x.min(b.x),
                        top: a.y.min(b.y),
                        x1: a.x.max(b.x),
                        bottom: a.y.max(b.y),
                        line_width: painted.line_width,
                        orientation: Orientation::of_segment(a, b),
                    });
                    continue;
                }

                let quad = match pts.len() {
                    4 if closed => axis_aligned_quad(&pts),
                    5 if same_point(pts[0], pts[4]) => axis_aligned_quad(&pts[..4]),
                    _ => None,
                };
                if let Some(bbox) = quad {
                    self.rects.push(Rect {
                        x0: bbox.x0,
                        top: bbox.top,
                        x1: bbox.x1,
                        bottom: bbox.bottom,
                        line_width: painted.line_width,
                        stroke: painted.stroke,
                        fill: painted.fill,
                    });
                    continue;
                }
            }

            self.curves.push(Curve { pts });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ctm;
    use crate::path::PathBuilder;

    fn page() -> PageSpace {
        PageSpace::from_media_box(0.0, 0.0, 200.0, 100.0)
    }

    fn painted(
        build: impl FnOnce(&mut PathBuilder, &Ctm),
        stroke: bool,
        fill: bool,
    ) -> PaintedPath {
        let mut b = PathBuilder::new();
        build(&mut b, &Ctm::identity());
        PaintedPath {
            path: b.take(),
            stroke,
            fill,
            line_width: 1.0,
        }
    }

    fn extract(p: &PaintedPath) -> Shapes {
        let mut shapes = Shapes::default();
        shapes.add_painted_path(p, &page());
        shapes
    }

    #[test]
    fn test_single_segment_becomes_line_in_page_space() {
        let p = painted(
            |b, m| {
                b.move_to(m, 10.0, 90.0);
                b.line_to(m, 60.0, 90.0);
            },
            true,
            false,
        );
        let shapes = extract(&p);
        assert_eq!(shapes.lines.len(), 1);
        let line = &shapes.lines[0];
        assert_eq!(
            (line.x0, line.top, line.x1, line.bottom),
            (10.0, 10.0, 60.0, 10.0)
        );
        assert_eq!(line.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_re_becomes_rect_regardless_of_paint() {
        for (stroke, fill) in [(true, false), (false, true), (true, true)] {
            let p = painted(|b, m| b.rectangle(m, 10.0, 20.0, 50.0, 30.0), stroke, fill);
            let shapes = extract(&p);
            assert_eq!(shapes.rects.len(), 1);
            let r = &shapes.rects[0];
            assert_eq!((r.x0, r.top, r.x1, r.bottom), (10.0, 50.0, 60.0, 80.0));
            assert_eq!((r.stroke, r.fill), (stroke, fill));
        }
    }

    #[test]
    fn test_five_point_closed_polyline_is_rect() {
        let p = painted(
            |b, m| {
                b.move_to(m, 0.0, 0.0);
                b.line_to(m, 10.0, 0.0);
                b.line_to(m, 10.0, 10.0);
                b.line_to(m, 0.0, 10.0);
                b.line_to(m, 0.0, 0.0);
            },
            true,
            false,
        );
        let shapes = extract(&p);
        assert_eq!(shapes.rects.len(), 1);
        assert!(shapes.curves.is_empty());
    }

    #[test]
    fn test_polyline_becomes_curve_with_all_points() {
        let p = painted(
            |b, m| {
                b.move_to(m, 0.0, 0.0);
                b.line_to(m, 10.0, 0.0);
                b.line_to(m, 10.0, 10.0);
            },
            true,
            false,
        );
        let shapes = extract(&p);
        assert!(shapes.lines.is_empty());
        assert_eq!(shapes.curves.len(), 1);
        assert_eq!(shapes.curves[0].pts.len(), 3);
    }

    #[test]
    fn test_bezier_keeps_control_points() {
        let p = painted(
            |b, m| {
                b.move_to(m, 0.0, 0.0);
                b.curve_to(m, [0.0, 5.0, 5.0, 10.0, 10.0, 10.0]);
            },
            true,
            false,
        );
        let shapes = extract(&p);
        assert_eq!(shapes.curves.len(), 1);
        assert_eq!(shapes.curves[0].pts.len(), 4);
    }

    #[test]
    fn test_each_subpath_classified_separately() {
        let p = painted(
            |b, m| {
                b.move_to(m, 0.0, 10.0);
                b.line_to(m, 50.0, 10.0);
                b.move_to(m, 0.0, 20.0);
                b.line_to(m, 50.0, 20.0);
                b.rectangle(m, 0.0, 30.0, 5.0, 5.0);
            },
            true,
            false,
        );
        let shapes = extract(&p);
        assert_eq!(shapes.lines.len(), 2);
        assert_eq!(shapes.rects.len(), 1);
    }

    #[test]
    fn test_lone_move_to_is_ignored() {
        let p = painted(|b, m| b.move_to(m, 1.0, 1.0), true, false);
        assert_eq!(extract(&p), Shapes::default());
    }
}
