//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestTableBuilder` - Builder pattern for in-memory tables
//! - `sample_csv()` / `session_from_csv()` - Upload fixtures
//! - `xlsx_workbook()` - Minimal single-sheet .xlsx bytes

use autoviz::app::VizSession;
use autoviz::settings::Settings;
use autoviz::types::{DataCell, DataColumn, DataRow, DataSource, DataType};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// ============================================================================
// TestTableBuilder - Builder pattern for creating test tables
// ============================================================================

/// Builder for column-oriented test tables.
///
/// # Example
/// ```ignore
/// let table = TestTableBuilder::new()
///     .with_numbers("age", &[Some(25.0), None])
///     .with_text("city", &["NY", "LA"])
///     .build();
/// ```
#[derive(Default)]
pub struct TestTableBuilder {
    columns: Vec<(DataColumn, Vec<DataCell>)>,
}

impl TestTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numbers(mut self, name: &str, values: &[Option<f64>]) -> Self {
        let cells = values
            .iter()
            .map(|v| v.map(DataCell::Number).unwrap_or(DataCell::Empty))
            .collect();
        self.columns.push((DataColumn::new(name, DataType::Number), cells));
        self
    }

    pub fn with_text(mut self, name: &str, values: &[&str]) -> Self {
        let cells = values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    DataCell::Empty
                } else {
                    DataCell::Text(v.to_string())
                }
            })
            .collect();
        self.columns.push((DataColumn::new(name, DataType::Text), cells));
        self
    }

    pub fn with_dates(mut self, name: &str, values: &[&str]) -> Self {
        let cells = values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    DataCell::Empty
                } else {
                    DataCell::Date(v.to_string())
                }
            })
            .collect();
        self.columns.push((DataColumn::new(name, DataType::Date), cells));
        self
    }

    pub fn with_booleans(mut self, name: &str, values: &[bool]) -> Self {
        let cells = values.iter().map(|v| DataCell::Boolean(*v)).collect();
        self.columns.push((DataColumn::new(name, DataType::Boolean), cells));
        self
    }

    /// Build the table. Every column must have the same length.
    pub fn build(self) -> DataSource {
        let row_count = self.columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        assert!(
            self.columns.iter().all(|(_, c)| c.len() == row_count),
            "ragged test table"
        );

        let rows = (0..row_count)
            .map(|i| DataRow::new(self.columns.iter().map(|(_, c)| c[i].clone()).collect()))
            .collect();
        let columns = self.columns.into_iter().map(|(col, _)| col).collect();
        DataSource::new("test", columns, rows)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Small sales table with numeric, text, date and boolean columns
pub fn sample_csv() -> &'static str {
    "region,units,revenue,day,promo\n\
     North,10,120.5,2024-01-03,true\n\
     South,7,80.0,2024-01-01,false\n\
     North,12,150.0,2024-01-02,false\n\
     East,,60.25,2024-01-05,true\n\
     North,9,99.0,2024-01-04,false\n"
}

pub fn session_from_csv(csv: &str) -> VizSession {
    VizSession::from_upload("sales.csv", csv.as_bytes(), Settings::default())
        .expect("fixture CSV should load")
}

// ============================================================================
// XLSX fixtures
// ============================================================================

/// A cell written by [`xlsx_workbook`]
pub enum XlsxCell {
    Text(&'static str),
    Number(f64),
    /// Excel serial day number, stored with the built-in date format
    Date(f64),
    Empty,
}

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Build a one-sheet workbook; the first row is usually the header row.
///
/// Strings go through the shared string table and are not XML-escaped.
pub fn xlsx_workbook(rows: &[Vec<XlsxCell>]) -> Vec<u8> {
    let mut strings: Vec<&str> = Vec::new();
    let mut sheet_data = String::new();

    for (r, row) in rows.iter().enumerate() {
        sheet_data.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            assert!(c < 26, "fixture supports columns A-Z only");
            let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
            match cell {
                XlsxCell::Text(text) => {
                    sheet_data.push_str(&format!(
                        r#"<c r="{}" t="s"><v>{}</v></c>"#,
                        reference,
                        strings.len()
                    ));
                    strings.push(text);
                }
                XlsxCell::Number(n) => {
                    sheet_data.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n));
                }
                XlsxCell::Date(serial) => {
                    sheet_data.push_str(&format!(
                        r#"<c r="{}" s="1"><v>{}</v></c>"#,
                        reference, serial
                    ));
                }
                XlsxCell::Empty => {}
            }
        }
        sheet_data.push_str("</row>");
    }

    let shared: String = strings
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", s))
        .collect();

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#
                .to_string(),
        ),
        (
            "_rels/.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
                REL_NS
            ),
        ),
        (
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
                SPREADSHEET_NS, REL_NS
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{rel}/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="{rel}/styles" Target="styles.xml"/><Relationship Id="rId3" Type="{rel}/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#,
                rel = REL_NS
            ),
        ),
        (
            "xl/styles.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{}"><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#,
                SPREADSHEET_NS
            ),
        ),
        (
            "xl/sharedStrings.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{}" count="{n}" uniqueCount="{n}">{}</sst>"#,
                SPREADSHEET_NS,
                shared,
                n = strings.len()
            ),
        ),
        (
            "xl/worksheets/sheet1.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#,
                SPREADSHEET_NS, sheet_data
            ),
        ),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in parts {
        zip.start_file(path, SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish workbook").into_inner()
}
