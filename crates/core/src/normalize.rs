//! Sheet normalization: pruning, classification, and row linearization.
//!
//! A sheet is formatted cell by cell, fully empty rows are dropped, then
//! columns that are empty across every surviving row are dropped. What is
//! left is rendered as one pipe-delimited line per row.

use crate::cell::CellFormatter;
use crate::classify::looks_like_kpi;
use crate::{RawCell, SheetReport};

/// Separator placed between cells of a linearized row.
pub const CELL_SEPARATOR: &str = " | ";

/// Join formatted cells into one line, keeping empty cells as empty segments
/// so columns stay aligned across rows.
pub fn linearize<S: AsRef<str>>(row: &[S]) -> String {
    row.iter()
        .map(|cell| cell.as_ref())
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Normalizer that turns one sheet's raw grid into a [`SheetReport`].
#[derive(Debug, Clone, Default)]
pub struct SheetNormalizer {
    formatter: CellFormatter,
}

impl SheetNormalizer {
    /// Create a new sheet normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Format every cell and prune empty rows, then empty columns.
    ///
    /// Rows are padded to the widest row first, so every returned row has the
    /// same length and no returned row or column is entirely empty.
    pub fn clean(&self, grid: &[Vec<RawCell>]) -> Vec<Vec<String>> {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);

        let rows: Vec<Vec<String>> = grid
            .iter()
            .map(|row| {
                let mut formatted: Vec<String> =
                    row.iter().map(|cell| self.formatter.format(cell)).collect();
                formatted.resize(width, String::new());
                formatted
            })
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();

        // Judged only across the rows that survived.
        let keep: Vec<bool> = (0..width)
            .map(|col| rows.iter().any(|row| !row[col].is_empty()))
            .collect();

        rows.into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&keep)
                    .filter_map(|(cell, &kept)| kept.then_some(cell))
                    .collect()
            })
            .collect()
    }

    /// Normalize one sheet into its report.
    pub fn normalize(&self, sheet_name: &str, grid: &[Vec<RawCell>]) -> SheetReport {
        let cleaned = self.clean(grid);

        if cleaned.is_empty() {
            log::debug!("Sheet '{}' has no content", sheet_name);
            return SheetReport::empty(sheet_name);
        }

        let kpi = looks_like_kpi(&cleaned);
        log::debug!(
            "Sheet '{}': {} rows x {} columns, kpi={}",
            sheet_name,
            cleaned.len(),
            cleaned[0].len(),
            kpi
        );

        SheetReport {
            sheet_name: sheet_name.to_string(),
            kpi,
            lines: cleaned.iter().map(|row| linearize(row)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KPI_ANNOTATION;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    #[test]
    fn test_linearize_keeps_empty_segments() {
        assert_eq!(linearize(&["a", "", "c"]), "a |  | c");
        assert_eq!(linearize(&["only"]), "only");
        assert_eq!(linearize::<&str>(&[]), "");
    }

    #[test]
    fn test_all_empty_rows_give_empty_report() {
        let normalizer = SheetNormalizer::new();
        let grid = vec![
            vec![RawCell::Empty, text("nan")],
            vec![text("  "), text("None")],
        ];

        let report = normalizer.normalize("Blank", &grid);
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_single_column_surrounded_by_empty_columns() {
        let normalizer = SheetNormalizer::new();
        let grid = vec![
            vec![RawCell::Empty, text("North"), RawCell::Empty],
            vec![text("nan"), text("South"), text("")],
        ];

        let cleaned = normalizer.clean(&grid);
        assert_eq!(cleaned, vec![vec!["North"], vec!["South"]]);

        let report = normalizer.normalize("Regions", &grid);
        assert_eq!(report.lines, vec!["North", "South"]);
        assert!(report.lines.iter().all(|l| !l.contains(CELL_SEPARATOR)));
    }

    #[test]
    fn test_rows_pruned_before_columns() {
        let normalizer = SheetNormalizer::new();
        // The empty row goes, and the leading column with it.
        let grid = vec![
            vec![RawCell::Empty, text("Name"), text("Notes")],
            vec![],
            vec![RawCell::Empty, text("Alice"), RawCell::Empty],
        ];

        let cleaned = normalizer.clean(&grid);
        assert_eq!(cleaned, vec![vec!["Name", "Notes"], vec!["Alice", ""]]);
    }

    #[test]
    fn test_ragged_rows_padded() {
        let normalizer = SheetNormalizer::new();
        let grid = vec![vec![text("a")], vec![text("b"), text("c"), text("d")]];

        let report = normalizer.normalize("Ragged", &grid);
        assert_eq!(report.lines, vec!["a |  | ", "b | c | d"]);
    }

    #[test]
    fn test_kpi_sheet_annotated() {
        let normalizer = SheetNormalizer::new();
        let grid = vec![vec![text("Revenue"), text("100")]];

        let report = normalizer.normalize("Finance", &grid);
        assert!(report.kpi);
        assert_eq!(
            report.to_string(),
            format!("### Sheet: Finance\n{}\nRevenue | 100.00", KPI_ANNOTATION)
        );
    }

    #[test]
    fn test_narrative_sheet_not_annotated() {
        let normalizer = SheetNormalizer::new();
        let grid = vec![
            vec![text("Event"), text("Date")],
            vec![text("Board visit"), text("2024-01-05")],
        ];

        let report = normalizer.normalize("Events", &grid);
        assert!(!report.kpi);
        assert_eq!(
            report.to_string(),
            "### Sheet: Events\nEvent | Date\nBoard visit | 05-Jan-2024"
        );
    }
}
