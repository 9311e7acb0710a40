//! Character bounding box calculation from content stream events.
//!
//! Combines font metrics, text state and CTM into the glyph's box in page
//! space (top-left origin).

use pdftables_core::{BBox, Char, Ctm, PageSpace, Point};

use crate::handler::CharEvent;

/// Convert a [`CharEvent`] into a [`Char`] positioned in `space`.
///
/// The text rendering matrix is `Trm = [Tfs*Th, 0, 0, Tfs, 0, Trise] x Tm x CTM`.
/// The glyph box spans the glyph width horizontally and one em upward from
/// the font's descent, as pdfminer lays out `LTChar`. Spacing operators move
/// later glyphs but do not widen this one.
pub fn char_from_event(event: &CharEvent, space: &PageSpace) -> Char {
    let font_matrix = Ctm::new(
        event.font_size * event.h_scaling,
        0.0,
        0.0,
        event.font_size,
        0.0,
        event.rise,
    );
    let trm = font_matrix
        .concat(&Ctm::from_array(event.text_matrix))
        .concat(&Ctm::from_array(event.ctm));

    let width = event.displacement / 1000.0;
    let descent = event.descent / 1000.0;
    let top = descent + 1.0;

    let corners = [
        Point::new(0.0, descent),
        Point::new(width, descent),
        Point::new(width, top),
        Point::new(0.0, top),
    ]
    .map(|p| space.to_page(trm.transform_point(p)));

    let bbox = corners.iter().skip(1).fold(
        BBox::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y),
        |acc, p| {
            BBox::new(
                acc.x0.min(p.x),
                acc.top.min(p.y),
                acc.x1.max(p.x),
                acc.bottom.max(p.y),
            )
        },
    );

    let upright = trm.b.abs() < 1e-6 && trm.c.abs() < 1e-6;

    let text = event.unicode.clone().unwrap_or_else(|| {
        char::from_u32(event.char_code)
            .map(String::from)
            .unwrap_or_else(|| "\u{FFFD}".to_string())
    });

    Char {
        text,
        bbox,
        fontname: event.font_name.clone(),
        size: trm.c.hypot(trm.d),
        upright,
    }
}
