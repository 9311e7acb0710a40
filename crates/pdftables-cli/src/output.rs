//! JSON output in the layout of Python's `json.dumps` defaults: `", "` and
//! `": "` separators, everything outside printable ASCII escaped as `\uXXXX`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

#[derive(Debug, Default)]
pub struct PythonFormatter;

impl Formatter for PythonFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch < '\u{7f}' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// The failure payload.
#[derive(Debug, Serialize)]
pub struct ErrorPayload<'a> {
    pub error: &'a str,
}

/// Serialize `value` to `writer` followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> io::Result<()> {
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PythonFormatter);
    value.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write `value` to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    write_json(io::stdout().lock(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdftables::{ExtractionResult, TableRecord};

    fn render<T: Serialize + ?Sized>(value: &T) -> String {
        let mut buf = Vec::new();
        write_json(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_separators_match_python() {
        let result = ExtractionResult {
            tables: vec![TableRecord {
                page: 2,
                headers: vec!["Name".into(), "Age".into()],
                rows: vec![vec!["Al".into(), "30".into()]],
            }],
            has_tables: true,
            page_count: 2,
        };
        assert_eq!(
            render(&result),
            "{\"tables\": [{\"page\": 2, \"headers\": [\"Name\", \"Age\"], \
             \"rows\": [[\"Al\", \"30\"]]}], \"has_tables\": true, \"page_count\": 2}\n"
        );
    }

    #[test]
    fn test_empty_collections() {
        let result = ExtractionResult {
            tables: Vec::new(),
            has_tables: false,
            page_count: 0,
        };
        assert_eq!(
            render(&result),
            "{\"tables\": [], \"has_tables\": false, \"page_count\": 0}\n"
        );
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        assert_eq!(render("caf\u{e9}"), "\"caf\\u00e9\"\n");
        assert_eq!(render("\u{1f600}"), "\"\\ud83d\\ude00\"\n");
        assert_eq!(render("\u{7f}"), "\"\\u007f\"\n");
    }

    #[test]
    fn test_control_and_quote_escapes() {
        assert_eq!(render("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"\n");
    }

    #[test]
    fn test_error_payload() {
        let payload = ErrorPayload {
            error: "PDF path required",
        };
        assert_eq!(render(&payload), "{\"error\": \"PDF path required\"}\n");
    }
}
