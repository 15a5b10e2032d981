//! Report rendering for generated summaries.
//!
//! Reports are written under collision-free names: `<stem>.<ext>` first,
//! then `<stem>_v2.<ext>`, `<stem>_v3.<ext>`, and so on.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A summary ready to be rendered, with its heading lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoReport {
    /// Main heading.
    pub title: String,

    /// Optional secondary heading.
    pub subtitle: Option<String>,

    /// Summary text; paragraphs are separated by blank lines.
    pub summary: String,
}

impl MemoReport {
    /// Create a report with the given title and summary.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            summary: summary.into(),
        }
    }

    /// Wrap a plain summary with the default monthly title, e.g.
    /// `Monthly Memo - January-2024`.
    pub fn from_summary(summary: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(format!("Monthly Memo - {}", date.format("%B-%Y")), summary)
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Summary paragraphs, trimmed, with empty ones dropped.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.summary
            .trim()
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Produces a report file from a memo.
pub trait ReportRenderer {
    /// Render the memo and return the path of the written file.
    fn render(&self, memo: &MemoReport) -> Result<PathBuf>;
}

/// File stem for a report generated at the given time,
/// e.g. `Generate_report_2024-01-05_09-30`.
pub fn report_file_stem(at: NaiveDateTime) -> String {
    format!("Generate_report_{}", at.format("%Y-%m-%d_%H-%M"))
}

/// First path under `dir` for `stem` and `ext` that does not exist yet.
pub fn versioned_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut path = dir.join(format!("{}.{}", stem, ext));
    let mut version = 1;

    while path.exists() {
        version += 1;
        path = dir.join(format!("{}_v{}.{}", stem, version, ext));
    }

    path
}

/// Renders memos as plain-text files.
///
/// Files use the `Generate_report_<YYYY-MM-DD_HH-MM>[_vN]` naming of PDF
/// reports with a `.txt` extension.
#[derive(Debug, Clone)]
pub struct TextReportRenderer {
    output_dir: PathBuf,
    salutation: String,
    closing: String,
}

impl TextReportRenderer {
    /// Create a renderer writing into `output_dir` (created on demand).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            salutation: "Dear Colleagues,".to_string(),
            closing: "Sincerely,".to_string(),
        }
    }

    /// Set the greeting line placed before the summary.
    pub fn with_salutation(mut self, salutation: impl Into<String>) -> Self {
        self.salutation = salutation.into();
        self
    }

    /// Set the sign-off placed after the summary.
    pub fn with_closing(mut self, closing: impl Into<String>) -> Self {
        self.closing = closing.into();
        self
    }

    /// Lay out the memo as text dated `date`.
    pub fn format(&self, memo: &MemoReport, date: NaiveDate) -> String {
        let mut blocks = vec![memo.title.clone()];
        if let Some(subtitle) = &memo.subtitle {
            blocks.push(subtitle.clone());
        }
        blocks.push(format!("Date: {}", date.format("%d-%b-%Y")));
        blocks.push(self.salutation.clone());
        blocks.extend(memo.paragraphs().into_iter().map(str::to_string));
        blocks.push(self.closing.clone());

        format!("{}\n", blocks.join("\n\n"))
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, memo: &MemoReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::Render(format!(
                "Failed to create report directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let now = Local::now().naive_local();
        let path = versioned_path(&self.output_dir, &report_file_stem(now), "txt");

        fs::write(&path, self.format(memo, now.date()))
            .map_err(|e| Error::Render(format!("Failed to write {}: {}", path.display(), e)))?;

        log::info!("Report written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_from_summary_title() {
        let memo = MemoReport::from_summary("All good.", date());
        assert_eq!(memo.title, "Monthly Memo - January-2024");
        assert_eq!(memo.subtitle, None);
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let memo = MemoReport::new("T", "\n First para.\n\n\n Second para. \n\n");
        assert_eq!(memo.paragraphs(), vec!["First para.", "Second para."]);
    }

    #[test]
    fn test_report_file_stem() {
        let at = date().and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(report_file_stem(at), "Generate_report_2024-01-05_09-30");
    }

    #[test]
    fn test_versioned_path_increments() {
        let dir = tempfile::tempdir().unwrap();

        let first = versioned_path(dir.path(), "report", "pdf");
        assert_eq!(first, dir.path().join("report.pdf"));
        fs::write(&first, "x").unwrap();

        let second = versioned_path(dir.path(), "report", "pdf");
        assert_eq!(second, dir.path().join("report_v2.pdf"));
        fs::write(&second, "x").unwrap();

        let third = versioned_path(dir.path(), "report", "pdf");
        assert_eq!(third, dir.path().join("report_v3.pdf"));
    }

    #[test]
    fn test_format_layout() {
        let renderer = TextReportRenderer::new("unused").with_closing("Regards,");
        let memo = MemoReport::new("Title", "One.\n\nTwo.").with_subtitle("Board update");

        assert_eq!(
            renderer.format(&memo, date()),
            "Title\n\nBoard update\n\nDate: 05-Jan-2024\n\nDear Colleagues,\n\nOne.\n\nTwo.\n\nRegards,\n"
        );
    }

    #[test]
    fn test_render_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let renderer = TextReportRenderer::new(&out);
        let memo = MemoReport::new("Title", "Body.");

        let first = renderer.render(&memo).unwrap();
        let second = renderer.render(&memo).unwrap();

        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        assert_eq!(first.extension().and_then(|e| e.to_str()), Some("txt"));
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Generate_report_"));
        assert!(fs::read_to_string(&first).unwrap().contains("Body."));
    }
}
