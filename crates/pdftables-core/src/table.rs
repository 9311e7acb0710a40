//! Table detection from ruling lines.
//!
//! Pipeline: filter edges, snap, join, filter again, intersect, build the
//! smallest cells, then group cells that share a corner into tables.
//! All tolerances default to 3.0, matching Python pdfplumber.

use std::collections::{BTreeMap, BTreeSet};

use crate::cluster::cluster_indices;
use crate::edges::Edge;
use crate::geometry::{BBox, Orientation};
use crate::text::Char;
use crate::words::{WordExtractor, WordOptions};

/// Configuration for table detection.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSettings {
    /// Snap tolerance for vertical edges (clustered by x).
    pub snap_x_tolerance: f64,
    /// Snap tolerance for horizontal edges (clustered by y).
    pub snap_y_tolerance: f64,
    /// Join tolerance for horizontal edges.
    pub join_x_tolerance: f64,
    /// Join tolerance for vertical edges.
    pub join_y_tolerance: f64,
    /// Minimum edge length after merging.
    pub edge_min_length: f64,
    /// Minimum edge length before merging.
    pub edge_min_length_prefilter: f64,
    pub intersection_x_tolerance: f64,
    pub intersection_y_tolerance: f64,
    /// Text tolerance along x-axis, used when reading cell text.
    pub text_x_tolerance: f64,
    /// Text tolerance along y-axis, used when reading cell text.
    pub text_y_tolerance: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            snap_x_tolerance: 3.0,
            snap_y_tolerance: 3.0,
            join_x_tolerance: 3.0,
            join_y_tolerance: 3.0,
            edge_min_length: 3.0,
            edge_min_length_prefilter: 1.0,
            intersection_x_tolerance: 3.0,
            intersection_y_tolerance: 3.0,
            text_x_tolerance: 3.0,
            text_y_tolerance: 3.0,
        }
    }
}

impl TableSettings {
    pub fn word_options(&self) -> WordOptions {
        WordOptions {
            x_tolerance: self.text_x_tolerance,
            y_tolerance: self.text_y_tolerance,
        }
    }
}

/// A detected table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Bounding box enclosing all cells.
    pub bbox: BBox,
    /// Cell boxes, top-to-bottom then left-to-right.
    pub cells: Vec<BBox>,
}

/// One row of a table: a slot per distinct column start, `None` where no
/// cell begins at that column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Option<BBox>>,
    pub bbox: BBox,
}

fn float_key(v: f64) -> i64 {
    (v * 1000.0).round() as i64
}

fn length_at_least(edge: &Edge, min_length: f64) -> bool {
    edge.orientation != Orientation::Diagonal && edge.length() >= min_length
}

/// Keep horizontal and vertical edges at least `min_length` long.
pub fn filter_edges(edges: Vec<Edge>, min_length: f64) -> Vec<Edge> {
    edges
        .into_iter()
        .filter(|e| length_at_least(e, min_length))
        .collect()
}

/// Align nearby parallel edges to the mean of their cluster.
///
/// Horizontal edges are clustered by `top` within `snap_y_tolerance`,
/// vertical edges by `x0` within `snap_x_tolerance`. Diagonal edges pass
/// through unchanged.
pub fn snap_edges(edges: Vec<Edge>, snap_x_tolerance: f64, snap_y_tolerance: f64) -> Vec<Edge> {
    let mut result = Vec::with_capacity(edges.len());
    let mut horizontals: Vec<Edge> = Vec::new();
    let mut verticals: Vec<Edge> = Vec::new();

    for edge in edges {
        match edge.orientation {
            Orientation::Horizontal => horizontals.push(edge),
            Orientation::Vertical => verticals.push(edge),
            Orientation::Diagonal => result.push(edge),
        }
    }

    snap_group(
        &mut horizontals,
        snap_y_tolerance,
        |e| e.top,
        |e, v| {
            e.top = v;
            e.bottom = v;
        },
    );
    result.extend(horizontals);

    snap_group(
        &mut verticals,
        snap_x_tolerance,
        |e| e.x0,
        |e, v| {
            e.x0 = v;
            e.x1 = v;
        },
    );
    result.extend(verticals);

    result
}

fn snap_group<F, G>(edges: &mut [Edge], tolerance: f64, key: F, mut set: G)
where
    F: Fn(&Edge) -> f64,
    G: FnMut(&mut Edge, f64),
{
    let values: Vec<f64> = edges.iter().map(&key).collect();
    for cluster in cluster_indices(&values, tolerance) {
        let mean = cluster.iter().map(|&i| values[i]).sum::<f64>() / cluster.len() as f64;
        for i in cluster {
            set(&mut edges[i], mean);
        }
    }
}

/// Merge collinear edge segments whose gap is within the join tolerance.
///
/// Horizontal edges on the same y merge along x within `join_x_tolerance`;
/// vertical edges on the same x merge along y within `join_y_tolerance`.
pub fn join_edge_group(
    edges: Vec<Edge>,
    join_x_tolerance: f64,
    join_y_tolerance: f64,
) -> Vec<Edge> {
    let mut result: Vec<Edge> = Vec::new();
    let mut horizontals: Vec<Edge> = Vec::new();
    let mut verticals: Vec<Edge> = Vec::new();

    for edge in edges {
        match edge.orientation {
            Orientation::Horizontal => horizontals.push(edge),
            Orientation::Vertical => verticals.push(edge),
            Orientation::Diagonal => result.push(edge),
        }
    }

    result.extend(join_collinear(
        horizontals,
        |e| e.top,
        |e| (e.x0, e.x1),
        |proto, start, end| Edge {
            x0: start,
            x1: end,
            ..proto.clone()
        },
        join_x_tolerance,
    ));

    result.extend(join_collinear(
        verticals,
        |e| e.x0,
        |e| (e.top, e.bottom),
        |proto, start, end| Edge {
            top: start,
            bottom: end,
            ..proto.clone()
        },
        join_y_tolerance,
    ));

    result
}

fn join_collinear<K, S, B>(
    mut edges: Vec<Edge>,
    key: K,
    span: S,
    build: B,
    tolerance: f64,
) -> Vec<Edge>
where
    K: Fn(&Edge) -> f64,
    S: Fn(&Edge) -> (f64, f64),
    B: Fn(&Edge, f64, f64) -> Edge,
{
    edges.sort_by(|a, b| {
        key(a)
            .total_cmp(&key(b))
            .then_with(|| span(a).0.total_cmp(&span(b).0))
    });

    let mut result = Vec::new();
    let mut i = 0;
    while i < edges.len() {
        let group_key = float_key(key(&edges[i]));
        let mut j = i + 1;
        while j < edges.len() && float_key(key(&edges[j])) == group_key {
            j += 1;
        }

        let (mut cur_start, mut cur_end) = span(&edges[i]);
        let mut proto = i;
        for k in (i + 1)..j {
            let (s, e) = span(&edges[k]);
            if s <= cur_end + tolerance {
                cur_end = cur_end.max(e);
            } else {
                result.push(build(&edges[proto], cur_start, cur_end));
                cur_start = s;
                cur_end = e;
                proto = k;
            }
        }
        result.push(build(&edges[proto], cur_start, cur_end));
        i = j;
    }
    result
}

/// Snap then join.
pub fn merge_edges(edges: Vec<Edge>, settings: &TableSettings) -> Vec<Edge> {
    let snapped = snap_edges(edges, settings.snap_x_tolerance, settings.snap_y_tolerance);
    join_edge_group(
        snapped,
        settings.join_x_tolerance,
        settings.join_y_tolerance,
    )
}

/// A point where a vertical edge crosses a horizontal one.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub x: f64,
    pub y: f64,
    /// Indices of vertical edges passing through this point.
    pub vertical: BTreeSet<usize>,
    /// Indices of horizontal edges passing through this point.
    pub horizontal: BTreeSet<usize>,
}

/// Intersections keyed by their rounded `(x, y)`, in `(x, y)` order.
pub type Intersections = BTreeMap<(i64, i64), Intersection>;

/// Find every crossing of a vertical and a horizontal edge.
///
/// The crossing point is `(v.x0, h.top)`. A vertical edge reaches a
/// horizontal one when, within tolerance, its x lies in the horizontal's
/// x-span and the horizontal's y lies in its y-span. Edge indices refer to
/// `edges`.
pub fn edges_to_intersections(
    edges: &[Edge],
    x_tolerance: f64,
    y_tolerance: f64,
) -> Intersections {
    let mut verticals: Vec<usize> = Vec::new();
    let mut horizontals: Vec<usize> = Vec::new();
    for (i, e) in edges.iter().enumerate() {
        match e.orientation {
            Orientation::Vertical => verticals.push(i),
            Orientation::Horizontal => horizontals.push(i),
            Orientation::Diagonal => {}
        }
    }
    verticals.sort_by(|&a, &b| {
        edges[a]
            .x0
            .total_cmp(&edges[b].x0)
            .then_with(|| edges[a].top.total_cmp(&edges[b].top))
    });
    horizontals.sort_by(|&a, &b| {
        edges[a]
            .top
            .total_cmp(&edges[b].top)
            .then_with(|| edges[a].x0.total_cmp(&edges[b].x0))
    });

    let mut intersections = Intersections::new();
    for &vi in &verticals {
        let v = &edges[vi];
        for &hi in &horizontals {
            let h = &edges[hi];
            let crosses = v.top <= h.top + y_tolerance
                && v.bottom >= h.top - y_tolerance
                && v.x0 >= h.x0 - x_tolerance
                && v.x0 <= h.x1 + x_tolerance;
            if !crosses {
                continue;
            }
            let point = intersections
                .entry((float_key(v.x0), float_key(h.top)))
                .or_insert_with(|| Intersection {
                    x: v.x0,
                    y: h.top,
                    vertical: BTreeSet::new(),
                    horizontal: BTreeSet::new(),
                });
            point.vertical.insert(vi);
            point.horizontal.insert(hi);
        }
    }
    intersections
}

/// Whether two intersections lie on a common edge.
fn edge_connects(a: &Intersection, b: &Intersection) -> bool {
    if float_key(a.x) == float_key(b.x) && !a.vertical.is_disjoint(&b.vertical) {
        return true;
    }
    float_key(a.y) == float_key(b.y) && !a.horizontal.is_disjoint(&b.horizontal)
}

/// Build the smallest cells from intersection points.
///
/// Each point is taken as a top-left corner. Candidate bottom-left corners
/// are the points below it, nearest first, and candidate top-right corners
/// the points to its right, nearest first. The first pair where both are
/// connected to the top-left by an edge, and where the opposite corner
/// exists and is connected to both, forms the cell.
pub fn intersections_to_cells(intersections: &Intersections) -> Vec<BBox> {
    let points: Vec<(&(i64, i64), &Intersection)> = intersections.iter().collect();
    let mut cells = Vec::new();

    for (i, &(&(kx, ky), pt)) in points.iter().enumerate() {
        let rest = &points[i + 1..];
        let below: Vec<&Intersection> = rest
            .iter()
            .filter(|(k, _)| k.0 == kx)
            .map(|&(_, p)| p)
            .collect();
        let right: Vec<&Intersection> = rest
            .iter()
            .filter(|(k, _)| k.1 == ky)
            .map(|&(_, p)| p)
            .collect();

        'search: for below_pt in &below {
            if !edge_connects(pt, below_pt) {
                continue;
            }
            for right_pt in &right {
                if !edge_connects(pt, right_pt) {
                    continue;
                }
                let corner = (float_key(right_pt.x), float_key(below_pt.y));
                let Some(br) = intersections.get(&corner) else {
                    continue;
                };
                if edge_connects(br, right_pt) && edge_connects(br, below_pt) {
                    cells.push(BBox::new(pt.x, pt.y, br.x, br.y));
                    break 'search;
                }
            }
        }
    }
    cells
}

fn corners(cell: &BBox) -> [(i64, i64); 4] {
    let (x0, top, x1, bottom) = (
        float_key(cell.x0),
        float_key(cell.top),
        float_key(cell.x1),
        float_key(cell.bottom),
    );
    [(x0, top), (x0, bottom), (x1, top), (x1, bottom)]
}

fn root_of(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Group cells that share a corner into tables.
///
/// Tables are ordered by their top-left-most corner; tables made of a
/// single cell are discarded.
pub fn cells_to_tables(cells: Vec<BBox>) -> Vec<Table> {
    let n = cells.len();
    let mut parent: Vec<usize> = (0..n).collect();
    let mut owner: BTreeMap<(i64, i64), usize> = BTreeMap::new();

    for (i, cell) in cells.iter().enumerate() {
        for corner in corners(cell) {
            match owner.get(&corner) {
                Some(&j) => {
                    let (a, b) = (root_of(&mut parent, i), root_of(&mut parent, j));
                    if a != b {
                        parent[a.max(b)] = a.min(b);
                    }
                }
                None => {
                    owner.insert(corner, i);
                }
            }
        }
    }

    let mut groups: BTreeMap<usize, Vec<BBox>> = BTreeMap::new();
    for (i, cell) in cells.into_iter().enumerate() {
        let root = root_of(&mut parent, i);
        groups.entry(root).or_default().push(cell);
    }

    let mut tables: Vec<Table> = groups
        .into_values()
        .filter(|cells| cells.len() > 1)
        .filter_map(|mut cells| {
            cells.sort_by(|a, b| a.top.total_cmp(&b.top).then_with(|| a.x0.total_cmp(&b.x0)));
            let (first, rest) = cells.split_first()?;
            let bbox = rest.iter().fold(*first, |acc, c| acc.union(c));
            Some(Table { bbox, cells })
        })
        .collect();

    tables.sort_by(|a, b| {
        a.bbox
            .top
            .total_cmp(&b.bbox.top)
            .then_with(|| a.bbox.x0.total_cmp(&b.bbox.x0))
    });
    tables
}

impl Table {
    /// Rows top to bottom; each row has one slot per distinct column start.
    pub fn rows(&self) -> Vec<TableRow> {
        let xs: BTreeSet<i64> = self.cells.iter().map(|c| float_key(c.x0)).collect();

        let mut by_top: BTreeMap<i64, BTreeMap<i64, BBox>> = BTreeMap::new();
        for cell in &self.cells {
            by_top
                .entry(float_key(cell.top))
                .or_default()
                .insert(float_key(cell.x0), *cell);
        }

        by_top
            .into_values()
            .filter_map(|row| {
                let present: Vec<BBox> = row.values().copied().collect();
                let (first, rest) = present.split_first()?;
                let bbox = rest.iter().fold(*first, |acc, c| acc.union(c));
                let cells = xs.iter().map(|x| row.get(x).copied()).collect();
                Some(TableRow { cells, bbox })
            })
            .collect()
    }

    /// Text of every cell, row by row.
    ///
    /// A character belongs to a cell when its center lies in the cell's
    /// half-open box. Missing slots are `None`; cells without characters
    /// yield an empty string.
    pub fn extract(&self, chars: &[Char], options: &WordOptions) -> Vec<Vec<Option<String>>> {
        self.rows()
            .iter()
            .map(|row| {
                let row_chars: Vec<&Char> = chars
                    .iter()
                    .filter(|c| row.bbox.contains_half_open(c.bbox.center()))
                    .collect();
                row.cells
                    .iter()
                    .map(|slot| {
                        slot.map(|cell| {
                            let cell_chars: Vec<&Char> = row_chars
                                .iter()
                                .copied()
                                .filter(|c| cell.contains_half_open(c.bbox.center()))
                                .collect();
                            if cell_chars.is_empty() {
                                String::new()
                            } else {
                                WordExtractor::text(&cell_chars, options)
                            }
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

/// Orchestrates detection over one page's edges.
pub struct TableFinder {
    edges: Vec<Edge>,
    settings: TableSettings,
}

impl TableFinder {
    pub fn new(edges: Vec<Edge>, settings: TableSettings) -> Self {
        Self { edges, settings }
    }

    /// Run the detection pipeline and return tables in reading order.
    pub fn find_tables(&self) -> Vec<Table> {
        let edges = filter_edges(self.edges.clone(), self.settings.edge_min_length_prefilter);
        let edges = merge_edges(edges, &self.settings);
        let edges = filter_edges(edges, self.settings.edge_min_length);
        if edges.is_empty() {
            return Vec::new();
        }

        let intersections = edges_to_intersections(
            &edges,
            self.settings.intersection_x_tolerance,
            self.settings.intersection_y_tolerance,
        );
        let cells = intersections_to_cells(&intersections);
        cells_to_tables(cells)
    }
}
