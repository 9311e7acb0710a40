//! Content stream interpreter.
//!
//! Walks the decoded operators of a content stream, maintaining graphics and
//! text state, and reports glyphs and painted paths to a [`ContentHandler`].
//! Form XObjects are interpreted recursively with their own resources.

use std::collections::HashMap;

use lopdf::Object;
use lopdf::content::Content;
use pdftables_core::{Ctm, PathBuilder};

use crate::error::BackendError;
use crate::font::LoadedFont;
use crate::handler::{CharEvent, ContentHandler, PaintOp, PathEvent};
use crate::interpreter_state::InterpreterState;
use crate::lopdf_backend::{decode_stream, object_to_f64_opt, resolve_object};
use crate::text_state::TextState;

/// Maximum nesting of Form XObjects below the page content.
pub(crate) const MAX_FORM_DEPTH: usize = 16;

/// Interpret one content stream.
///
/// * `resources` - resource dictionary in scope (page or form)
/// * `depth` - Form XObject nesting level, 0 for page content
pub(crate) fn interpret_content_stream<'a>(
    doc: &'a lopdf::Document,
    stream_bytes: &[u8],
    resources: &'a lopdf::Dictionary,
    handler: &mut dyn ContentHandler,
    depth: usize,
    gstate: &mut InterpreterState,
    tstate: &mut TextState,
) -> Result<(), BackendError> {
    if depth > MAX_FORM_DEPTH {
        return Err(BackendError::Interpreter(format!(
            "Form XObject recursion depth {depth} exceeds limit {MAX_FORM_DEPTH}"
        )));
    }
    if stream_bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let content = Content::decode(stream_bytes)
        .map_err(|e| BackendError::Parse(format!("failed to decode content stream: {e}")))?;

    let mut fonts: HashMap<String, LoadedFont<'a>> = HashMap::new();
    let mut path = PathBuilder::new();

    for op in &content.operations {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            // Graphics state
            "q" => gstate.save_state(tstate.save_snapshot()),
            "Q" => {
                if let Some(snapshot) = gstate.restore_state() {
                    tstate.restore_snapshot(snapshot);
                }
            }
            "cm" => {
                if let Some(m) = numbers::<6>(operands) {
                    gstate.concat_matrix(&Ctm::from_array(m));
                }
            }
            "w" => {
                if let Some([width]) = numbers::<1>(operands) {
                    gstate.set_line_width(width);
                }
            }

            // Path construction
            "m" => {
                if let Some([x, y]) = numbers::<2>(operands) {
                    path.move_to(gstate.ctm(), x, y);
                }
            }
            "l" => {
                if let Some([x, y]) = numbers::<2>(operands) {
                    path.line_to(gstate.ctm(), x, y);
                }
            }
            "c" => {
                if let Some(pts) = numbers::<6>(operands) {
                    path.curve_to(gstate.ctm(), pts);
                }
            }
            "v" => {
                if let Some(pts) = numbers::<4>(operands) {
                    path.curve_to_v(gstate.ctm(), pts);
                }
            }
            "y" => {
                if let Some(pts) = numbers::<4>(operands) {
                    path.curve_to_y(gstate.ctm(), pts);
                }
            }
            "h" => path.close_path(),
            "re" => {
                if let Some([x, y, w, h]) = numbers::<4>(operands) {
                    path.rectangle(gstate.ctm(), x, y, w, h);
                }
            }

            // Path painting
            "S" => paint(handler, gstate, &mut path, Some(PaintOp::Stroke)),
            "s" => {
                path.close_path();
                paint(handler, gstate, &mut path, Some(PaintOp::Stroke));
            }
            "f" | "F" | "f*" => paint(handler, gstate, &mut path, Some(PaintOp::Fill)),
            "B" | "B*" => paint(handler, gstate, &mut path, Some(PaintOp::FillAndStroke)),
            "b" | "b*" => {
                path.close_path();
                paint(handler, gstate, &mut path, Some(PaintOp::FillAndStroke));
            }
            "n" => paint(handler, gstate, &mut path, None),

            // Text state
            "BT" => tstate.begin_text(),
            "ET" => {}
            "Tf" => {
                let name = operands.first().map(name_of).unwrap_or_default();
                let size = operands.get(1).and_then(object_to_f64_opt).unwrap_or(0.0);
                font_for(&mut fonts, doc, resources, &name);
                tstate.set_font(name, size);
            }
            "Tm" => {
                if let Some(m) = numbers::<6>(operands) {
                    tstate.set_text_matrix(Ctm::from_array(m));
                }
            }
            "Td" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    tstate.move_text_position(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    tstate.move_text_position_and_set_leading(tx, ty);
                }
            }
            "T*" => tstate.move_to_next_line(),
            "Tc" => {
                if let Some([v]) = numbers::<1>(operands) {
                    tstate.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some([v]) = numbers::<1>(operands) {
                    tstate.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some([v]) = numbers::<1>(operands) {
                    tstate.h_scaling = v;
                }
            }
            "TL" => {
                if let Some([v]) = numbers::<1>(operands) {
                    tstate.leading = v;
                }
            }
            "Ts" => {
                if let Some([v]) = numbers::<1>(operands) {
                    tstate.rise = v;
                }
            }

            // Text showing
            "Tj" => {
                if let Some(bytes) = operands.first().and_then(|o| o.as_str().ok()) {
                    let font = font_for(&mut fonts, doc, resources, &tstate.font_name.clone());
                    show_string(handler, gstate, tstate, font, bytes);
                }
            }
            "'" => {
                tstate.move_to_next_line();
                if let Some(bytes) = operands.first().and_then(|o| o.as_str().ok()) {
                    let font = font_for(&mut fonts, doc, resources, &tstate.font_name.clone());
                    show_string(handler, gstate, tstate, font, bytes);
                }
            }
            "\"" => {
                if let (Some([aw, ac]), Some(bytes)) = (
                    numbers::<2>(operands),
                    operands.get(2).and_then(|o| o.as_str().ok()),
                ) {
                    tstate.word_spacing = aw;
                    tstate.char_spacing = ac;
                    tstate.move_to_next_line();
                    let font = font_for(&mut fonts, doc, resources, &tstate.font_name.clone());
                    show_string(handler, gstate, tstate, font, bytes);
                }
            }
            "TJ" => {
                if let Some(items) = operands.first().and_then(|o| o.as_array().ok()) {
                    let font = font_for(&mut fonts, doc, resources, &tstate.font_name.clone());
                    show_positioned(handler, gstate, tstate, font, items);
                }
            }

            // XObjects
            "Do" => {
                if let Some(name) = operands.first().map(name_of) {
                    handle_do(doc, resources, handler, depth, gstate, tstate, &name)?;
                }
            }

            _ => {}
        }
    }

    Ok(())
}

/// Read the first `N` operands as numbers.
fn numbers<const N: usize>(operands: &[Object]) -> Option<[f64; N]> {
    if operands.len() < N {
        return None;
    }
    let mut values = [0.0; N];
    for (slot, obj) in values.iter_mut().zip(operands) {
        *slot = object_to_f64_opt(obj)?;
    }
    Some(values)
}

fn name_of(obj: &Object) -> String {
    obj.as_name()
        .map(|n| String::from_utf8_lossy(n).into_owned())
        .unwrap_or_default()
}

fn paint(
    handler: &mut dyn ContentHandler,
    gstate: &InterpreterState,
    path: &mut PathBuilder,
    paint_op: Option<PaintOp>,
) {
    let finished = path.take();
    let Some(paint_op) = paint_op else {
        return;
    };
    if finished.segments.is_empty() {
        return;
    }
    handler.on_path_painted(PathEvent {
        path: finished,
        paint_op,
        line_width: gstate.line_width(),
    });
}

/// The cached font for a resource name, loading it on first use.
fn font_for<'f, 'a>(
    fonts: &'f mut HashMap<String, LoadedFont<'a>>,
    doc: &'a lopdf::Document,
    resources: &'a lopdf::Dictionary,
    name: &str,
) -> &'f LoadedFont<'a> {
    fonts
        .entry(name.to_string())
        .or_insert_with(|| load_font(doc, resources, name))
}

fn load_font<'a>(
    doc: &'a lopdf::Document,
    resources: &'a lopdf::Dictionary,
    name: &str,
) -> LoadedFont<'a> {
    let font_dict = resources
        .get(b"Font")
        .ok()
        .map(|o| resolve_object(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|fonts| fonts.get(name.as_bytes()).ok())
        .map(|o| resolve_object(doc, o))
        .and_then(|o| o.as_dict().ok());

    match font_dict {
        Some(dict) => LoadedFont::load(doc, name, dict),
        None => {
            tracing::warn!(font = name, "font resource missing, using default metrics");
            LoadedFont::fallback(name)
        }
    }
}

/// Emit one glyph per character code and advance the text matrix.
fn show_string(
    handler: &mut dyn ContentHandler,
    gstate: &InterpreterState,
    tstate: &mut TextState,
    font: &LoadedFont<'_>,
    bytes: &[u8],
) {
    let font_size = tstate.font_size;
    let h_scaling = tstate.h_scaling_normalized();

    for (code, raw) in font.codes(bytes) {
        let displacement = font.metrics.get_width(code);
        handler.on_char(CharEvent {
            char_code: code,
            unicode: font.decode(raw),
            font_name: font.base_name.clone(),
            font_size,
            text_matrix: tstate.text_matrix().to_array(),
            ctm: gstate.ctm().to_array(),
            displacement,
            h_scaling,
            rise: tstate.rise,
            descent: font.metrics.descent(),
        });

        // Word spacing applies to the single-byte code 32 only.
        let word_spacing = if !font.is_two_byte() && code == 32 {
            tstate.word_spacing
        } else {
            0.0
        };
        let tx =
            (displacement / 1000.0 * font_size + tstate.char_spacing + word_spacing) * h_scaling;
        tstate.advance_text_position(tx);
    }
}

/// `TJ`: strings are shown, numbers move the pen back by thousandths of
/// the font size.
fn show_positioned(
    handler: &mut dyn ContentHandler,
    gstate: &InterpreterState,
    tstate: &mut TextState,
    font: &LoadedFont<'_>,
    items: &[Object],
) {
    for item in items {
        if let Ok(bytes) = item.as_str() {
            show_string(handler, gstate, tstate, font, bytes);
        } else if let Some(adjustment) = object_to_f64_opt(item) {
            let tx = -(adjustment / 1000.0) * tstate.font_size * tstate.h_scaling_normalized();
            tstate.advance_text_position(tx);
        }
    }
}

fn handle_do<'a>(
    doc: &'a lopdf::Document,
    resources: &'a lopdf::Dictionary,
    handler: &mut dyn ContentHandler,
    depth: usize,
    gstate: &mut InterpreterState,
    tstate: &mut TextState,
    name: &str,
) -> Result<(), BackendError> {
    let stream = resources
        .get(b"XObject")
        .ok()
        .map(|o| resolve_object(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|xobjects| xobjects.get(name.as_bytes()).ok())
        .map(|o| resolve_object(doc, o))
        .and_then(|o| o.as_stream().ok());
    let Some(stream) = stream else {
        tracing::warn!(xobject = name, "XObject not found in resources, skipping");
        return Ok(());
    };

    // Images and other subtypes carry no ruling lines or text.
    if stream.dict.get(b"Subtype").and_then(Object::as_name).ok() != Some(b"Form".as_slice()) {
        return Ok(());
    }

    gstate.save_state(tstate.save_snapshot());

    let matrix = stream
        .dict
        .get(b"Matrix")
        .ok()
        .map(|o| resolve_object(doc, o))
        .and_then(|o| o.as_array().ok())
        .and_then(|values| numbers::<6>(values));
    if let Some(m) = matrix {
        gstate.concat_matrix(&Ctm::from_array(m));
    }

    let form_resources = stream
        .dict
        .get(b"Resources")
        .ok()
        .map(|o| resolve_object(doc, o))
        .and_then(|o| o.as_dict().ok())
        .unwrap_or(resources);

    let result = decode_stream(stream).and_then(|bytes| {
        interpret_content_stream(
            doc,
            &bytes,
            form_resources,
            handler,
            depth + 1,
            gstate,
            tstate,
        )
    });

    if let Some(snapshot) = gstate.restore_state() {
        tstate.restore_snapshot(snapshot);
    }
    result
}
