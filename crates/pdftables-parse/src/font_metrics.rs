//! Font metrics extraction from PDF font dictionaries.
//!
//! Simple fonts carry `/Widths` and `/FirstChar`, or name one of the
//! standard 14 faces; composite (Type0) fonts carry `/W` and `/DW` on their
//! descendant CIDFont. The descent comes from the `/FontDescriptor`.

use std::collections::BTreeMap;

use crate::lopdf_backend::{object_to_f64_opt, resolve_object};
use crate::standard_fonts::standard_font;

/// Default descent when not specified (-250/1000 of text space).
const DEFAULT_DESCENT: f64 = -250.0;

/// Default width for simple fonts without `/MissingWidth`.
const DEFAULT_WIDTH: f64 = 600.0;

/// Default `/DW` of a CIDFont.
const DEFAULT_CID_WIDTH: f64 = 1000.0;

/// Largest CID a `/W` array may assign.
const MAX_CID: u32 = 0xFFFF;

#[derive(Debug, Clone, PartialEq)]
enum Widths {
    /// `/Widths` indexed by `code - first_char`.
    Simple { first_char: u32, widths: Vec<f64> },
    /// Parsed `/W` array, by CID.
    Cid(BTreeMap<u32, f64>),
}

/// Glyph widths and descent, in glyph space units (1/1000 of text space).
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    widths: Widths,
    default_width: f64,
    descent: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::default_metrics()
    }
}

impl FontMetrics {
    /// Metrics for when font information is unavailable.
    pub fn default_metrics() -> Self {
        Self {
            widths: Widths::Simple {
                first_char: 0,
                widths: Vec::new(),
            },
            default_width: DEFAULT_WIDTH,
            descent: DEFAULT_DESCENT,
        }
    }

    pub fn get_width(&self, char_code: u32) -> f64 {
        let width = match &self.widths {
            Widths::Simple { first_char, widths } => char_code
                .checked_sub(*first_char)
                .and_then(|i| widths.get(i as usize))
                .copied(),
            Widths::Cid(widths) => widths.get(&char_code).copied(),
        };
        width.unwrap_or(self.default_width)
    }

    pub fn descent(&self) -> f64 {
        self.descent
    }
}

struct DescriptorInfo {
    descent: Option<f64>,
    missing_width: Option<f64>,
}

fn descriptor_number(
    doc: &lopdf::Document,
    desc: Option<&lopdf::Dictionary>,
    key: &[u8],
) -> Option<f64> {
    let obj = desc?.get(key).ok()?;
    object_to_f64_opt(resolve_object(doc, obj))
}

fn parse_font_descriptor(doc: &lopdf::Document, font_dict: &lopdf::Dictionary) -> DescriptorInfo {
    let desc = font_dict
        .get(b"FontDescriptor")
        .ok()
        .map(|obj| resolve_object(doc, obj))
        .and_then(|obj| obj.as_dict().ok());

    DescriptorInfo {
        descent: descriptor_number(doc, desc, b"Descent"),
        missing_width: descriptor_number(doc, desc, b"MissingWidth"),
    }
}

/// Extract metrics for a simple font.
///
/// `/Widths` wins when present. Otherwise a standard 14 `/BaseFont` supplies
/// its AFM widths. A standard face always uses its AFM descender.
pub fn extract_font_metrics(doc: &lopdf::Document, font_dict: &lopdf::Dictionary) -> FontMetrics {
    let standard = font_dict
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .and_then(|name| std::str::from_utf8(name).ok())
        .and_then(standard_font);

    let first_char = font_dict
        .get(b"FirstChar")
        .ok()
        .map(|o| resolve_object(doc, o))
        .and_then(object_to_f64_opt)
        .map(|v| v as u32)
        .unwrap_or(0);

    let explicit: Option<Vec<f64>> = font_dict
        .get(b"Widths")
        .ok()
        .map(|obj| resolve_object(doc, obj))
        .and_then(|obj| obj.as_array().ok())
        .map(|arr| {
            arr.iter()
                .map(|o| object_to_f64_opt(resolve_object(doc, o)).unwrap_or(0.0))
                .collect()
        });

    let widths = match (explicit, standard) {
        (Some(widths), _) => Widths::Simple { first_char, widths },
        (None, Some(font)) => Widths::Simple {
            first_char: 0,
            widths: font.widths.iter().map(|&w| f64::from(w)).collect(),
        },
        (None, None) => Widths::Simple {
            first_char,
            widths: Vec::new(),
        },
    };

    let info = parse_font_descriptor(doc, font_dict);
    let descent = match standard {
        Some(font) => f64::from(font.descent),
        None => info.descent.unwrap_or(DEFAULT_DESCENT),
    };
    FontMetrics {
        widths,
        default_width: info.missing_width.unwrap_or(DEFAULT_WIDTH),
        descent,
    }
}

/// Extract metrics for a Type0 font from its descendant CIDFont dictionary.
pub fn extract_cid_font_metrics(
    doc: &lopdf::Document,
    cid_font_dict: &lopdf::Dictionary,
) -> FontMetrics {
    let widths = cid_font_dict
        .get(b"W")
        .ok()
        .map(|obj| resolve_object(doc, obj))
        .and_then(|obj| obj.as_array().ok())
        .map(|arr| parse_w_array(arr, doc))
        .unwrap_or_default();

    let default_width = cid_font_dict
        .get(b"DW")
        .ok()
        .map(|o| resolve_object(doc, o))
        .and_then(object_to_f64_opt)
        .unwrap_or(DEFAULT_CID_WIDTH);

    let info = parse_font_descriptor(doc, cid_font_dict);
    FontMetrics {
        widths: Widths::Cid(widths),
        default_width,
        descent: info.descent.unwrap_or(DEFAULT_DESCENT),
    }
}

fn cid_of(value: f64) -> Option<u32> {
    (0.0..=f64::from(MAX_CID))
        .contains(&value)
        .then_some(value as u32)
}

/// Parse a CIDFont `/W` array.
///
/// Entries are either `c [w1 w2 ...]` (consecutive CIDs from `c`) or
/// `c_first c_last w` (one width for a range). Entries reaching past CID
/// 65535 or with `c_last < c_first` are skipped.
pub fn parse_w_array(objects: &[lopdf::Object], doc: &lopdf::Document) -> BTreeMap<u32, f64> {
    let mut widths = BTreeMap::new();
    let mut i = 0;

    while i < objects.len() {
        let Some(start) = object_to_f64_opt(resolve_object(doc, &objects[i])) else {
            i += 1;
            continue;
        };
        i += 1;

        let Some(next) = objects.get(i).map(|o| resolve_object(doc, o)) else {
            break;
        };
        if let Ok(arr) = next.as_array() {
            if let Some(cid_start) = cid_of(start) {
                for (j, obj) in arr.iter().enumerate() {
                    let cid = u32::try_from(j)
                        .ok()
                        .and_then(|j| cid_start.checked_add(j))
                        .filter(|cid| *cid <= MAX_CID);
                    let Some(cid) = cid else {
                        break;
                    };
                    if let Some(w) = object_to_f64_opt(resolve_object(doc, obj)) {
                        widths.insert(cid, w);
                    }
                }
            }
            i += 1;
        } else if let Some(end) = object_to_f64_opt(next) {
            let w = objects
                .get(i + 1)
                .map(|o| resolve_object(doc, o))
                .and_then(object_to_f64_opt);
            match (cid_of(start), cid_of(end), w) {
                (Some(first), Some(last), Some(w)) if first <= last => {
                    for cid in first..=last {
                        widths.insert(cid, w);
                    }
                }
                _ => tracing::debug!(start, end, "skipping /W range outside the CID space"),
            }
            i += 2;
        } else {
            i += 1;
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Object, dictionary};

    #[test]
    fn test_default_metrics() {
        let m = FontMetrics::default_metrics();
        assert_eq!(m.get_width(65), 600.0);
        assert_eq!(m.descent(), -250.0);
    }

    #[test]
    fn test_simple_widths_with_first_char() {
        let doc = Document::with_version("1.5");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "FirstChar" => 65,
            "Widths" => vec![Object::Integer(722), Object::Integer(667)],
        };
        let m = extract_font_metrics(&doc, &font);
        assert_eq!(m.get_width(65), 722.0);
        assert_eq!(m.get_width(66), 667.0);
        assert_eq!(m.get_width(67), 600.0);
        assert_eq!(m.get_width(10), 600.0);
    }

    #[test]
    fn test_descriptor_metrics_and_missing_width() {
        let mut doc = Document::with_version("1.5");
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "Ascent" => 900,
            "Descent" => -200,
            "MissingWidth" => 250,
        });
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "FontDescriptor" => descriptor_id,
        };
        let m = extract_font_metrics(&doc, &font);
        assert_eq!(m.descent(), -200.0);
        assert_eq!(m.get_width(65), 250.0);
    }

    #[test]
    fn test_parse_w_array_both_forms() {
        let doc = Document::with_version("1.5");
        let objects = vec![
            Object::Integer(1),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
            Object::Integer(10),
            Object::Integer(12),
            Object::Integer(250),
        ];
        let widths = parse_w_array(&objects, &doc);
        assert_eq!(widths.get(&1), Some(&500.0));
        assert_eq!(widths.get(&2), Some(&600.0));
        assert_eq!(widths.get(&3), None);
        assert_eq!(widths.get(&10), Some(&250.0));
        assert_eq!(widths.get(&12), Some(&250.0));
    }

    #[test]
    fn test_cid_metrics_fall_back_to_dw() {
        let doc = Document::with_version("1.5");
        let cid_font = dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "DW" => 800,
            "W" => vec![Object::Integer(3), Object::Array(vec![Object::Integer(278)])],
        };
        let m = extract_cid_font_metrics(&doc, &cid_font);
        assert_eq!(m.get_width(3), 278.0);
        assert_eq!(m.get_width(4), 800.0);
    }

    #[test]
    fn test_w_array_start_near_u32_max_is_skipped() {
        let doc = Document::with_version("1.5");
        let objects = vec![
            Object::Integer(4_294_967_295),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
            Object::Integer(5),
            Object::Array(vec![Object::Integer(700)]),
        ];
        let widths = parse_w_array(&objects, &doc);
        assert_eq!(widths.len(), 1);
        assert_eq!(widths.get(&5), Some(&700.0));
    }

    #[test]
    fn test_w_array_consecutive_widths_stop_at_max_cid() {
        let doc = Document::with_version("1.5");
        let objects = vec![
            Object::Integer(65_534),
            Object::Array(vec![
                Object::Integer(1),
                Object::Integer(2),
                Object::Integer(3),
            ]),
        ];
        let widths = parse_w_array(&objects, &doc);
        assert_eq!(
            widths.keys().copied().collect::<Vec<_>>(),
            vec![65_534, 65_535]
        );
    }

    #[test]
    fn test_w_array_oversized_and_inverted_ranges_are_skipped() {
        let doc = Document::with_version("1.5");
        let objects = vec![
            Object::Integer(0),
            Object::Integer(20_000_000),
            Object::Integer(500),
            Object::Integer(30),
            Object::Integer(20),
            Object::Integer(400),
            Object::Integer(-5),
            Object::Integer(2),
            Object::Integer(300),
            Object::Integer(40),
            Object::Integer(41),
            Object::Integer(250),
        ];
        let widths = parse_w_array(&objects, &doc);
        assert_eq!(widths.len(), 2);
        assert_eq!(widths.get(&40), Some(&250.0));
        assert_eq!(widths.get(&41), Some(&250.0));
    }

    #[test]
    fn test_standard_font_without_widths_uses_afm() {
        let doc = Document::with_version("1.5");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        };
        let m = extract_font_metrics(&doc, &font);
        assert_eq!(m.get_width(u32::from(b'i')), 222.0);
        assert_eq!(m.get_width(u32::from(b'W')), 944.0);
        assert_eq!(m.descent(), -207.0);
    }

    #[test]
    fn test_explicit_widths_override_standard_font() {
        let doc = Document::with_version("1.5");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Times-Roman",
            "FirstChar" => 65,
            "Widths" => vec![Object::Integer(100)],
        };
        let m = extract_font_metrics(&doc, &font);
        assert_eq!(m.get_width(65), 100.0);
        // Codes outside /Widths do not fall back to the AFM table
        assert_eq!(m.get_width(66), 600.0);
        assert_eq!(m.descent(), -217.0);
    }
}
