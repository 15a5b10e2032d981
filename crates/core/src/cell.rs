//! Cell formatting for spreadsheet text output.
//!
//! Turns a raw cell into a stable display string: blanks collapse to the
//! empty string, recognizable dates become `DD-Mon-YYYY`, numbers get
//! thousands separators and two decimals, everything else passes through.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::RawCell;

/// Matches an unsigned decimal once commas and a leading `$` are removed.
static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Accepted input date layouts, tried in order. The first that parses wins,
/// so `03/04/2024` is read day-first.
const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%b-%Y", "%d-%m-%Y"];

/// Output layout for every recognized date, e.g. `05-Jan-2024`.
const DATE_OUTPUT: &str = "%d-%b-%Y";

/// Lower-cased values that count as a blank cell.
const BLANK_VALUES: &[&str] = &["", "nan", "none"];

/// Formatter for individual spreadsheet cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellFormatter;

impl CellFormatter {
    /// Create a new cell formatter.
    pub fn new() -> Self {
        Self
    }

    /// Format a raw cell into its display string.
    pub fn format(&self, raw: &RawCell) -> String {
        match raw {
            RawCell::Empty => String::new(),
            RawCell::Text(text) => self.format_text(text),
            RawCell::Number(n) if n.is_nan() => String::new(),
            RawCell::Number(n) if n.is_infinite() => n.to_string(),
            RawCell::Number(n) => format_amount(*n, false),
            RawCell::Date(date) => date.format(DATE_OUTPUT).to_string(),
        }
    }

    /// Format a cell that arrived as text.
    ///
    /// Malformed date- or number-like strings never fail; they fall through
    /// to the next rule and finally come back trimmed but otherwise unchanged.
    pub fn format_text(&self, text: &str) -> String {
        let value = text.trim();

        if is_blank(value) {
            return String::new();
        }

        if let Some(date) = parse_date(value) {
            return date.format(DATE_OUTPUT).to_string();
        }

        let without_commas = value.replace(',', "");
        let (dollar, digits) = match without_commas.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, without_commas.as_str()),
        };

        if NUMERIC_REGEX.is_match(digits) {
            if let Ok(n) = digits.parse::<f64>() {
                return format_amount(n, dollar);
            }
        }

        value.to_string()
    }
}

/// True for values treated as an empty cell (case-insensitive, trimmed).
pub fn is_blank(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    BLANK_VALUES.contains(&lowered.as_str())
}

/// Parse against each accepted date layout in declared order.
fn parse_date(value: &str) -> Option<NaiveDate> {
    // chrono's `%Y` accepts a leading sign.
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    DATE_PATTERNS.iter().find_map(|pattern| {
        NaiveDate::parse_from_str(value, pattern)
            .ok()
            // A four-digit year, as a strict `%Y` would demand.
            .filter(|d| (1000..=9999).contains(&d.year()))
    })
}

/// Render with thousands separators and exactly two decimals.
fn format_amount(n: f64, dollar: bool) -> String {
    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if n < 0.0 && fixed != "0.00" { "-" } else { "" };
    let currency = if dollar { "$" } else { "" };

    format!("{}{}{}.{}", sign, currency, grouped, frac_part)
}
