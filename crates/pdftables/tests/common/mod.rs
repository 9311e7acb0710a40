//! Fixture PDFs built in memory with lopdf.

#![allow(dead_code)]

use lopdf::{Object, Stream, dictionary};

/// A US Letter document with one page per content stream. Every page shares
/// a Helvetica font resource named `F1`.
pub fn pdf_with_pages(contents: &[String]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = Vec::new();
    for content in contents {
        let stream = Stream::new(dictionary! {}, content.as_bytes().to_vec());
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Content stream for a fully ruled grid whose top-left corner is at
/// `(left, top)` in PDF user space, 100pt columns and 20pt rows, with each
/// non-empty cell text drawn at 10pt inside its cell.
pub fn ruled_table(left: f64, top: f64, rows: &[&[&str]]) -> String {
    const COL_WIDTH: f64 = 100.0;
    const ROW_HEIGHT: f64 = 20.0;

    let ncols = rows.first().map_or(0, |r| r.len());
    let right = left + ncols as f64 * COL_WIDTH;
    let bottom = top - rows.len() as f64 * ROW_HEIGHT;

    let mut content = String::from("0.5 w\n");
    for i in 0..=rows.len() {
        let y = top - i as f64 * ROW_HEIGHT;
        content.push_str(&format!("{left} {y} m {right} {y} l S\n"));
    }
    for j in 0..=ncols {
        let x = left + j as f64 * COL_WIDTH;
        content.push_str(&format!("{x} {bottom} m {x} {top} l S\n"));
    }
    for (i, row) in rows.iter().enumerate() {
        for (j, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let x = left + j as f64 * COL_WIDTH + 5.0;
            let y = top - (i + 1) as f64 * ROW_HEIGHT + 5.0;
            content.push_str(&format!("BT /F1 10 Tf {x} {y} Td ({text}) Tj ET\n"));
        }
    }
    content
}

/// Content stream with a single line of text and no ruling.
pub fn plain_text(text: &str) -> String {
    format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET\n")
}
