//! Table detection driven from painted paths, through shapes and edges.

use pdftables_core::{
    BBox, Char, Ctm, PageSpace, PaintedPath, PathBuilder, Shapes, TableFinder, TableSettings,
    WordOptions, derive_edges,
};

fn page() -> PageSpace {
    PageSpace::from_media_box(0.0, 0.0, 400.0, 400.0)
}

fn stroke(build: impl FnOnce(&mut PathBuilder, &Ctm)) -> PaintedPath {
    let mut builder = PathBuilder::new();
    build(&mut builder, &Ctm::identity());
    PaintedPath {
        path: builder.take(),
        stroke: true,
        fill: false,
        line_width: 1.0,
    }
}

fn char_at(text: &str, x0: f64, top: f64) -> Char {
    Char {
        text: text.to_string(),
        bbox: BBox::new(x0, top, x0 + 6.0, top + 10.0),
        fontname: "Helvetica".to_string(),
        size: 10.0,
        upright: true,
    }
}

#[test]
fn rectangles_form_a_grid() {
    // Two rows of two 100x20 cells, drawn as separate rectangles whose
    // shared sides overlap.
    let mut shapes = Shapes::default();
    for (x, y) in [(50.0, 330.0), (150.0, 330.0), (50.0, 310.0), (150.0, 310.0)] {
        let painted = stroke(|b, ctm| b.rectangle(ctm, x, y, 100.0, 20.0));
        shapes.add_painted_path(&painted, &page());
    }
    assert_eq!(shapes.rects.len(), 4);

    let finder = TableFinder::new(derive_edges(&shapes), TableSettings::default());
    let tables = finder.find_tables();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].cells.len(), 4);
    assert_eq!(tables[0].bbox, BBox::new(50.0, 50.0, 250.0, 90.0));

    let chars = vec![
        char_at("a", 60.0, 55.0),
        char_at("b", 160.0, 55.0),
        char_at("c", 60.0, 75.0),
        char_at("d", 166.0, 75.0),
        char_at("e", 172.0, 75.0),
    ];
    let grid = tables[0].extract(&chars, &WordOptions::default());
    assert_eq!(
        grid,
        vec![
            vec![Some("a".to_string()), Some("b".to_string())],
            vec![Some("c".to_string()), Some("de".to_string())],
        ]
    );
}

#[test]
fn lone_rectangle_is_not_a_table() {
    let mut shapes = Shapes::default();
    let painted = stroke(|b, ctm| b.rectangle(ctm, 10.0, 10.0, 100.0, 50.0));
    shapes.add_painted_path(&painted, &page());

    let finder = TableFinder::new(derive_edges(&shapes), TableSettings::default());
    assert!(finder.find_tables().is_empty());
}

#[test]
fn transformed_lines_are_detected() {
    // The same 2x1 grid drawn in a scaled coordinate system.
    let ctm = Ctm::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
    let mut shapes = Shapes::default();
    let segments: [(f64, f64, f64, f64); 5] = [
        (10.0, 150.0, 110.0, 150.0),
        (10.0, 140.0, 110.0, 140.0),
        (10.0, 140.0, 10.0, 150.0),
        (60.0, 140.0, 60.0, 150.0),
        (110.0, 140.0, 110.0, 150.0),
    ];
    for (x0, y0, x1, y1) in segments {
        let mut builder = PathBuilder::new();
        builder.move_to(&ctm, x0, y0);
        builder.line_to(&ctm, x1, y1);
        let painted = PaintedPath {
            path: builder.take(),
            stroke: true,
            fill: false,
            line_width: 1.0,
        };
        shapes.add_painted_path(&painted, &page());
    }

    let tables = TableFinder::new(derive_edges(&shapes), TableSettings::default()).find_tables();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].bbox, BBox::new(20.0, 100.0, 220.0, 120.0));
    assert_eq!(tables[0].rows().len(), 1);
}
