//! Domain types for representing documents and extracted spreadsheet content.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::{Error, Result};

/// Marker line emitted under a sheet header when the sheet looks like KPI data.
pub const KPI_ANNOTATION: &str = "[KPI/metrics data detected]";

/// The format of a source document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Word-processing document (Office Open XML).
    Docx,
    /// Portable Document Format.
    Pdf,
    /// Spreadsheet workbook (Office Open XML).
    Xlsx,
}

impl DocumentFormat {
    /// Detect format from a file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Detect format from a path's extension.
    ///
    /// Fails with [`Error::UnsupportedFormat`] carrying the rejected extension
    /// (dot included, original case) when it is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self::from_extension(&ext).ok_or(Error::UnsupportedFormat(ext))
    }

    /// Canonical lowercase extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
        }
    }
}

/// A single spreadsheet cell as stored in the source workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawCell {
    /// No value.
    Empty,
    /// Text, which may still look like a date or a number.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Calendar date (any time-of-day component is dropped).
    Date(NaiveDate),
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::Text(s)
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

impl From<NaiveDate> for RawCell {
    fn from(d: NaiveDate) -> Self {
        RawCell::Date(d)
    }
}

/// One sheet's cells, row-major. Rows may have differing lengths.
pub type Grid = Vec<Vec<RawCell>>;

/// The text produced for one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetReport {
    /// Sheet name as declared in the workbook.
    pub sheet_name: String,

    /// Whether the classifier flagged this sheet as KPI/metrics data.
    pub kpi: bool,

    /// One linearized line per cleaned row, in original order.
    pub lines: Vec<String>,
}

impl SheetReport {
    /// A report that contributes no text.
    pub fn empty(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            kpi: false,
            lines: Vec::new(),
        }
    }

    /// True when the sheet had no content rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for SheetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        write!(f, "### Sheet: {}", self.sheet_name)?;
        if self.kpi {
            write!(f, "\n{}", KPI_ANNOTATION)?;
        }
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}
