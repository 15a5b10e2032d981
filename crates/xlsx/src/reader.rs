//! XLSX workbook reader implementation.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use mailer_core::workbook::parse_failure_message;
use mailer_core::{Error, Grid, RawCell, Result, WorkbookExtractor, WorkbookSource};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// An .xlsx workbook opened through `calamine`.
pub struct XlsxWorkbook<RS: Read + Seek> {
    inner: Xlsx<RS>,
}

impl XlsxWorkbook<BufReader<File>> {
    /// Open a workbook file. The file handle lives as long as the workbook.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = open_workbook::<Xlsx<_>, _>(path)
            .map_err(|e| Error::SpreadsheetParse(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl<RS: Read + Seek> XlsxWorkbook<RS> {
    /// Open a workbook from any seekable reader.
    pub fn from_reader(reader: RS) -> Result<Self> {
        let inner = Xlsx::new(reader).map_err(|e| Error::SpreadsheetParse(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl<RS: Read + Seek> WorkbookSource for XlsxWorkbook<RS> {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Grid> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| Error::SpreadsheetParse(format!("Worksheet '{}': {}", name, e)))?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(to_raw_cell).collect())
            .collect())
    }
}

/// Map a calamine cell onto the core cell type.
fn to_raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Text(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
            Some(datetime) => RawCell::Date(datetime.date()),
            None => RawCell::Number(dt.as_f64()),
        },
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso_date(s)
            .map(RawCell::Date)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Text(e.to_string()),
    }
}

/// Date part of an ISO 8601 date or date-time string.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    s.parse::<NaiveDateTime>()
        .map(|dt| dt.date())
        .or_else(|_| s.parse::<NaiveDate>())
        .ok()
}

/// Extract normalized text from an .xlsx file, surfacing failures.
pub fn try_extract(path: &Path) -> Result<String> {
    log::debug!("Opening workbook {}", path.display());
    let mut workbook = XlsxWorkbook::open(path)?;
    WorkbookExtractor::new().try_extract(&mut workbook)
}

/// Extract normalized text from an .xlsx file.
///
/// Never fails: an unreadable workbook yields
/// `Failed to parse Excel file: <cause>`.
pub fn extract_text(path: &Path) -> String {
    try_extract(path).unwrap_or_else(|e| {
        log::warn!("Failed to parse {}: {}", path.display(), e);
        parse_failure_message(&e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailer_core::{KPI_ANNOTATION, NO_DATA_SENTINEL};
    use std::io::Write;
    use zip::write::FileOptions;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
</Relationships>"#;

    fn workbook_xml(first: &str, second: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="{}" sheetId="1" r:id="rId1"/><sheet name="{}" sheetId="2" r:id="rId2"/></sheets>
</workbook>"#,
            first, second
        )
    }

    fn sheet_xml(rows: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            rows
        )
    }

    fn write_workbook(path: &Path, names: (&str, &str), sheets: (&str, &str)) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = FileOptions::default();

        let parts = [
            ("xl/workbook.xml".to_string(), workbook_xml(names.0, names.1)),
            ("xl/_rels/workbook.xml.rels".to_string(), WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml".to_string(), sheet_xml(sheets.0)),
            ("xl/worksheets/sheet2.xml".to_string(), sheet_xml(sheets.1)),
        ];
        for (name, content) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_empty_and_revenue_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_workbook(
            &path,
            ("Blank", "Summary"),
            (
                "",
                r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Revenue</t></is></c><c r="B1"><v>100</v></c></row>"#,
            ),
        );

        let text = extract_text(&path);

        assert_eq!(text.matches("### Sheet:").count(), 1);
        assert!(text.contains("### Sheet: Summary"));
        assert!(text.contains(KPI_ANNOTATION));
        assert!(text.lines().any(|l| l == "Revenue | 100.00"));
    }

    #[test]
    fn test_all_sheets_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_workbook(&path, ("One", "Two"), ("", ""));

        assert_eq!(extract_text(&path), NO_DATA_SENTINEL);
    }

    #[test]
    fn test_open_lists_sheets_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_workbook(
            &path,
            ("Intro", "Figures"),
            ("", r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Target</t></is></c></row>"#),
        );

        let mut workbook = XlsxWorkbook::open(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Intro", "Figures"]);

        let grid = workbook.read_sheet("Figures").unwrap();
        assert_eq!(grid, vec![vec![RawCell::Text("Target".to_string())]]);
    }

    #[test]
    fn test_open_missing_file_is_parse_error() {
        assert!(matches!(
            XlsxWorkbook::open(Path::new("/nonexistent/dir/book.xlsx")),
            Err(Error::SpreadsheetParse(_))
        ));
    }

    #[test]
    fn test_corrupt_file_gives_failure_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        assert!(try_extract(&path).is_err());
        assert!(extract_text(&path).starts_with("Failed to parse Excel file: "));
    }

    #[test]
    fn test_missing_file_gives_failure_text() {
        let text = extract_text(Path::new("/nonexistent/dir/book.xlsx"));
        assert!(text.starts_with("Failed to parse Excel file: "));
    }

    #[test]
    fn test_to_raw_cell() {
        assert_eq!(to_raw_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(to_raw_cell(&Data::Int(7)), RawCell::Number(7.0));
        assert_eq!(to_raw_cell(&Data::Bool(true)), RawCell::Text("True".to_string()));
        assert_eq!(
            to_raw_cell(&Data::DateTimeIso("2024-01-05T08:00:00".to_string())),
            RawCell::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(
            to_raw_cell(&Data::DurationIso("PT1H".to_string())),
            RawCell::Text("PT1H".to_string())
        );
    }
}
