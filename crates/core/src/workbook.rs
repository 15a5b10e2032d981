//! Whole-workbook extraction over any sheet source.

use crate::normalize::SheetNormalizer;
use crate::{Error, Grid, Result, SheetReport};

/// Returned when no sheet in the workbook has any content.
pub const NO_DATA_SENTINEL: &str = "No readable data found in Excel file.";

/// A workbook whose sheets can be listed and read as raw grids.
///
/// Implemented over `calamine` for files on disk, and by [`InMemoryWorkbook`].
pub trait WorkbookSource {
    /// Sheet names in the workbook's declared order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet's cells.
    fn read_sheet(&mut self, name: &str) -> Result<Grid>;
}

/// A workbook held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, Grid)>,
}

impl InMemoryWorkbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet.
    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.sheets.push((name.into(), grid));
        self
    }
}

impl WorkbookSource for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Grid> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| Error::SpreadsheetParse(format!("Worksheet '{}' not found", name)))
    }
}

/// Render the text returned in place of a workbook that could not be read.
pub fn parse_failure_message(err: &Error) -> String {
    format!("Failed to parse Excel file: {}", err)
}

/// Extractor that normalizes every sheet of a workbook and joins the results.
#[derive(Debug, Clone, Default)]
pub struct WorkbookExtractor {
    normalizer: SheetNormalizer,
}

impl WorkbookExtractor {
    /// Create a new workbook extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize each sheet in declared order, keeping empty reports.
    pub fn reports<W: WorkbookSource>(&self, workbook: &mut W) -> Result<Vec<SheetReport>> {
        let mut reports = Vec::new();

        for name in workbook.sheet_names() {
            let grid = workbook.read_sheet(&name)?;
            reports.push(self.normalizer.normalize(&name, &grid));
        }

        Ok(reports)
    }

    /// Extract the workbook's text, surfacing read failures.
    ///
    /// Non-empty sheets are separated by a blank line; when none has content
    /// the result is [`NO_DATA_SENTINEL`].
    pub fn try_extract<W: WorkbookSource>(&self, workbook: &mut W) -> Result<String> {
        let reports = self.reports(workbook)?;

        let text = reports
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n\n");
        let text = text.trim();

        if text.is_empty() {
            log::info!("No sheet produced any content");
            return Ok(NO_DATA_SENTINEL.to_string());
        }

        Ok(text.to_string())
    }

    /// Extract the workbook's text, converting any read failure into a
    /// `Failed to parse Excel file: <cause>` message.
    pub fn extract<W: WorkbookSource>(&self, workbook: &mut W) -> String {
        self.try_extract(workbook).unwrap_or_else(|e| {
            log::warn!("Spreadsheet extraction failed: {}", e);
            parse_failure_message(&e)
        })
    }
}
