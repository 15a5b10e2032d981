//! XLSX workbook backend for spreadsheet-to-text normalization.
//!
//! Reads .xlsx files with `calamine` and feeds their sheets through the
//! core [`WorkbookExtractor`](mailer_core::WorkbookExtractor).

pub mod reader;

pub use reader::{extract_text, try_extract, XlsxWorkbook};
