//! End-to-end extraction: PDF bytes → Pdf → pages → cleaned table records.

mod common;

use common::{pdf_with_pages, plain_text, ruled_table};
use pdftables::{
    ExtractionResult, Pdf, PdfError, TableRecord, TableSettings, extract, extract_from_pdf,
};

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

fn extract_bytes(bytes: &[u8]) -> ExtractionResult {
    let pdf = Pdf::open(bytes).unwrap();
    extract_from_pdf(&pdf).unwrap()
}

#[test]
fn table_on_second_page() {
    let bytes = pdf_with_pages(&[
        plain_text("Cover page"),
        ruled_table(100.0, 700.0, &[&["Name", "Age"], &["Al", "30"]]),
    ]);

    let result = extract_bytes(&bytes);
    assert_eq!(
        result,
        ExtractionResult {
            tables: vec![TableRecord {
                page: 2,
                headers: strings(&["Name", "Age"]),
                rows: vec![strings(&["Al", "30"])],
            }],
            has_tables: true,
            page_count: 2,
        }
    );
}

#[test]
fn single_text_row_is_duplicated_into_rows() {
    let bytes = pdf_with_pages(&[ruled_table(100.0, 700.0, &[&["X", "Y"], &["", ""]])]);

    let result = extract_bytes(&bytes);
    assert_eq!(result.tables.len(), 1);
    assert_eq!(result.tables[0].headers, strings(&["X", "Y"]));
    assert_eq!(result.tables[0].rows, vec![strings(&["X", "Y"])]);
}

#[test]
fn long_cell_text_stays_in_its_column() {
    // 61.66pt of Helvetica at 10pt, inside a 100pt column
    let bytes = pdf_with_pages(&[ruled_table(
        100.0,
        700.0,
        &[&["illicit little lilies", "B"], &["1", "2"]],
    )]);

    let result = extract_bytes(&bytes);
    assert_eq!(
        result.tables[0].headers,
        strings(&["illicit little lilies", "B"])
    );
    assert_eq!(result.tables[0].rows, vec![strings(&["1", "2"])]);
}

#[test]
fn document_without_ruling_has_no_tables() {
    let bytes = pdf_with_pages(&[
        plain_text("Just prose"),
        plain_text("More prose"),
        String::new(),
    ]);

    let result = extract_bytes(&bytes);
    assert!(!result.has_tables);
    assert!(result.tables.is_empty());
    assert_eq!(result.page_count, 3);
}

#[test]
fn empty_grid_counts_as_found_but_is_not_reported() {
    let bytes = pdf_with_pages(&[ruled_table(100.0, 700.0, &[&["", ""], &["", ""]])]);

    let result = extract_bytes(&bytes);
    assert!(result.has_tables);
    assert!(result.tables.is_empty());
}

#[test]
fn tables_on_one_page_are_ordered_top_to_bottom() {
    let content = ruled_table(100.0, 400.0, &[&["Low", "Table"], &["1", "2"]])
        + &ruled_table(100.0, 700.0, &[&["High", "Table"], &["3", "4"]]);
    let bytes = pdf_with_pages(&[content]);

    let result = extract_bytes(&bytes);
    let headers: Vec<&str> = result
        .tables
        .iter()
        .map(|t| t.headers[0].as_str())
        .collect();
    assert_eq!(headers, vec!["High", "Low"]);
    assert!(result.tables.iter().all(|t| t.page == 1));
}

#[test]
fn extraction_is_repeatable() {
    let bytes = pdf_with_pages(&[
        ruled_table(
            50.0,
            750.0,
            &[&["A", "B", "C"], &["1", "", "3"], &["4", "5", "6"]],
        ),
        ruled_table(50.0, 500.0, &[&["D", "E"], &["7", "8"]]),
    ]);

    assert_eq!(extract_bytes(&bytes), extract_bytes(&bytes));
}

#[test]
fn page_exposes_chars_and_raw_grid() {
    let content = ruled_table(100.0, 700.0, &[&["Name", "Age"], &["Al", ""]]);
    let bytes = pdf_with_pages(&[content]);
    let pdf = Pdf::open(&bytes).unwrap();
    let page = pdf.page(0).unwrap();

    assert_eq!(page.width(), 612.0);
    assert_eq!(page.chars().len(), "NameAgeAl".len());
    assert_eq!(page.lines().len(), 6);
    assert_eq!(
        page.extract_tables(&TableSettings::default()),
        vec![vec![
            vec![Some("Name".to_string()), Some("Age".to_string())],
            vec![Some("Al".to_string()), Some(String::new())],
        ]]
    );
}

#[test]
fn extract_reads_from_path() {
    let bytes = pdf_with_pages(&[ruled_table(100.0, 700.0, &[&["K", "V"], &["a", "1"]])]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.pdf");
    std::fs::write(&path, &bytes).unwrap();

    let result = extract(&path).unwrap();
    assert_eq!(result.page_count, 1);
    assert_eq!(result.tables[0].rows, vec![strings(&["a", "1"])]);
}

#[test]
fn missing_file_is_an_error() {
    let err = extract("/nonexistent/report.pdf").unwrap_err();
    assert!(matches!(err, PdfError::IoError(_)));
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.5\nthis is not a pdf body").unwrap();

    assert!(extract(&path).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn result_serializes_in_field_order() {
    let content = ruled_table(100.0, 700.0, &[&["Name", "Age"], &["Al", "30"]]);
    let result = extract_bytes(&pdf_with_pages(&[content]));

    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(
        json,
        r#"{"tables":[{"page":1,"headers":["Name","Age"],"rows":[["Al","30"]]}],"has_tables":true,"page_count":1}"#
    );
    let back: ExtractionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
