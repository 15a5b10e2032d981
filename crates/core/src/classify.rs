//! Keyword heuristic for spotting KPI/metrics sheets.

use regex::Regex;
use std::sync::LazyLock;

/// Keywords (and the percent sign) that suggest a metrics table.
static KPI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)KPI|Metric|Target|Actual|Achieved|Revenue|Growth|%").unwrap()
});

/// True if any cell in the grid contains a KPI keyword as a substring.
///
/// Only drives the annotation line; a wrong answer never changes the
/// linearized rows.
pub fn looks_like_kpi<S: AsRef<str>>(grid: &[Vec<S>]) -> bool {
    grid.iter()
        .flatten()
        .any(|cell| KPI_REGEX.is_match(cell.as_ref()))
}
