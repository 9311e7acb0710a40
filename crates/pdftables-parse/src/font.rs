//! Font resources as seen by the interpreter: metrics, code width and text
//! decoding.

use crate::font_metrics::{FontMetrics, extract_cid_font_metrics, extract_font_metrics};
use crate::lopdf_backend::resolve_object;

/// A font resource ready for use by text-showing operators.
pub(crate) struct LoadedFont<'a> {
    /// `/BaseFont`, or the resource name when absent.
    pub base_name: String,
    pub metrics: FontMetrics,
    encoding: Option<lopdf::Encoding<'a>>,
    /// Type0 fonts use two-byte codes.
    two_byte: bool,
}

impl std::fmt::Debug for LoadedFont<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("base_name", &self.base_name)
            .field("two_byte", &self.two_byte)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl<'a> LoadedFont<'a> {
    /// Stand-in for a font that could not be resolved: default metrics,
    /// single-byte codes, Latin-1 text.
    pub fn fallback(resource_name: &str) -> Self {
        Self {
            base_name: resource_name.to_string(),
            metrics: FontMetrics::default_metrics(),
            encoding: None,
            two_byte: false,
        }
    }

    pub fn load(
        doc: &'a lopdf::Document,
        resource_name: &str,
        font_dict: &'a lopdf::Dictionary,
    ) -> Self {
        let base_name = font_dict
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_else(|| resource_name.to_string());

        let is_type0 = font_dict
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            == Some(b"Type0".as_slice());

        let metrics = if is_type0 {
            match descendant_font(doc, font_dict) {
                Some(cid_font) => extract_cid_font_metrics(doc, cid_font),
                None => {
                    tracing::warn!(font = %base_name, "Type0 font without DescendantFonts");
                    FontMetrics::default_metrics()
                }
            }
        } else {
            extract_font_metrics(doc, font_dict)
        };

        let encoding = match font_dict.get_font_encoding(doc) {
            Ok(encoding) => Some(encoding),
            Err(e) => {
                tracing::debug!(
                    font = %base_name,
                    error = %e,
                    "no usable encoding, using code points"
                );
                None
            }
        };

        Self {
            base_name,
            metrics,
            encoding,
            two_byte: is_type0,
        }
    }

    pub fn is_two_byte(&self) -> bool {
        self.two_byte
    }

    /// Split a shown string into character codes, each with its raw bytes.
    pub fn codes<'s>(&self, bytes: &'s [u8]) -> Vec<(u32, &'s [u8])> {
        if self.two_byte {
            bytes
                .chunks(2)
                .map(|chunk| {
                    let code = chunk.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
                    (code, chunk)
                })
                .collect()
        } else {
            bytes
                .chunks(1)
                .map(|chunk| (u32::from(chunk[0]), chunk))
                .collect()
        }
    }

    /// Unicode text for one code, when the encoding maps it.
    pub fn decode(&self, raw: &[u8]) -> Option<String> {
        let encoding = self.encoding.as_ref()?;
        encoding
            .bytes_to_string(raw)
            .ok()
            .filter(|text| !text.is_empty())
    }
}

fn descendant_font<'a>(
    doc: &'a lopdf::Document,
    font_dict: &'a lopdf::Dictionary,
) -> Option<&'a lopdf::Dictionary> {
    let descendants = resolve_object(doc, font_dict.get(b"DescendantFonts").ok()?);
    let first = descendants.as_array().ok()?.first()?;
    resolve_object(doc, first).as_dict().ok()
}
