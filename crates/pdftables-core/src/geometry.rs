//! Points, affine matrices, bounding boxes and the page coordinate frame.
//!
//! PDF user space has its origin at the bottom-left corner. Everything the
//! table finder consumes lives in *page space*: origin at the top-left corner
//! of the media box, `top` growing downwards.

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An affine transformation matrix `[a b c d e f]`, as used by `cm` and `Tm`.
///
/// Points are row vectors: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ctm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Ctm {
    fn default() -> Self {
        Self::identity()
    }
}

impl Ctm {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure translation.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Matrix product `self × other`: apply `self` first, then `other`.
    pub fn concat(&self, other: &Ctm) -> Ctm {
        Ctm {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Build a matrix from the six operands of `cm` / `Tm`.
    pub fn from_array(values: [f64; 6]) -> Self {
        let [a, b, c, d, e, f] = values;
        Self::new(a, b, c, d, e, f)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

/// Bounding box in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<BBox> {
        let first = points.first()?;
        let init = BBox::new(first.x, first.y, first.x, first.y);
        Some(points[1..].iter().fold(init, |acc, p| BBox {
            x0: acc.x0.min(p.x),
            top: acc.top.min(p.y),
            x1: acc.x1.max(p.x),
            bottom: acc.bottom.max(p.y),
        }))
    }

    /// Horizontal and vertical midpoint.
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Half-open containment: `[x0, x1) x [top, bottom)`.
    pub fn contains_half_open(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.top && p.y < self.bottom
    }
}

/// Orientation of a segment or edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Tolerance for deciding that a segment is axis-aligned.
const AXIS_TOLERANCE: f64 = 1e-6;

impl Orientation {
    /// Classify the segment between two page-space points.
    pub fn of_segment(a: Point, b: Point) -> Orientation {
        if (b.y - a.y).abs() < AXIS_TOLERANCE {
            Orientation::Horizontal
        } else if (b.x - a.x).abs() < AXIS_TOLERANCE {
            Orientation::Vertical
        } else {
            Orientation::Diagonal
        }
    }
}

/// Maps PDF user space onto page space for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpace {
    origin_x: f64,
    top_y: f64,
    width: f64,
    height: f64,
}

impl PageSpace {
    /// Frame for a `/MediaBox [x0 y0 x1 y1]`. Corners may come in any order.
    pub fn from_media_box(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            origin_x: x0.min(x1),
            top_y: y0.max(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Convert a user-space point (after the CTM) into page space.
    pub fn to_page(&self, p: Point) -> Point {
        Point::new(p.x - self.origin_x, self.top_y - p.y)
    }
}
