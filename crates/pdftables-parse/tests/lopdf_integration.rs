//! Backend round trips over documents built with lopdf.

use lopdf::{Object, Stream, dictionary};
use pdftables_parse::pdftables_core::{Char, PageSpace};
use pdftables_parse::{
    BackendError, CharEvent, ContentHandler, LopdfBackend, PaintOp, PathEvent, PdfBackend,
    char_from_event,
};

#[derive(Default)]
struct Collector {
    chars: Vec<CharEvent>,
    paths: Vec<PathEvent>,
}

impl ContentHandler for Collector {
    fn on_char(&mut self, event: CharEvent) {
        self.chars.push(event);
    }

    fn on_path_painted(&mut self, event: PathEvent) {
        self.paths.push(event);
    }
}

/// One page whose /Contents is an array of the given streams.
fn pdf_with_content_parts(parts: &[&str], compress: bool) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let contents: Vec<Object> = parts
        .iter()
        .map(|part| {
            let stream = Stream::new(dictionary! {}, part.as_bytes().to_vec());
            Object::Reference(doc.add_object(stream))
        })
        .collect();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 200.into(), 100.into()],
        "Contents" => contents,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    if compress {
        doc.compress();
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn interpret(bytes: &[u8]) -> (Collector, PageSpace) {
    let doc = LopdfBackend::open(bytes).unwrap();
    let page = LopdfBackend::get_page(&doc, 0).unwrap();
    let space = LopdfBackend::page_media_box(&doc, &page).unwrap();
    let mut collector = Collector::default();
    LopdfBackend::interpret_page(&doc, &page, &mut collector).unwrap();
    (collector, space)
}

#[test]
fn content_array_is_concatenated() {
    let bytes = pdf_with_content_parts(
        &["BT /F1 10 Tf 20 50 Td", "(Hey) Tj ET", "10 10 m 190 10 l S"],
        false,
    );
    let (collector, space) = interpret(&bytes);

    let chars: Vec<Char> = collector
        .chars
        .iter()
        .map(|e| char_from_event(e, &space))
        .collect();
    let text: String = chars.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(text, "Hey");
    assert_eq!(chars[0].fontname, "Courier");
    assert_eq!(chars[0].bbox.x0, 20.0);
    // Courier descends 1.57pt below the 50pt baseline; the box is 10pt tall
    assert!((chars[0].bbox.top - 41.57).abs() < 1e-9);
    assert!((chars[0].bbox.x1 - 26.0).abs() < 1e-9);

    assert_eq!(collector.paths.len(), 1);
    assert_eq!(collector.paths[0].paint_op, PaintOp::Stroke);
}

#[test]
fn compressed_streams_are_decoded() {
    let bytes = pdf_with_content_parts(&["0 0 10 10 re f 0 0 m 5 5 l S"], true);
    let (collector, _) = interpret(&bytes);
    assert_eq!(collector.paths.len(), 2);
}

#[test]
fn empty_page_yields_nothing() {
    let bytes = pdf_with_content_parts(&[""], false);
    let (collector, space) = interpret(&bytes);
    assert!(collector.chars.is_empty() && collector.paths.is_empty());
    assert_eq!(space.width(), 200.0);
}

#[test]
fn errors_convert_into_pdf_error() {
    let err = LopdfBackend::open(b"garbage").unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
    let pdf_err: pdftables_parse::pdftables_core::PdfError = err.into();
    assert!(pdf_err.to_string().contains("failed to parse PDF"));
}
