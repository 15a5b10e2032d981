//! Core domain types, spreadsheet-to-text normalization, and collaborator
//! interfaces for turning office documents into mailed summary reports.

pub mod cell;
pub mod classify;
pub mod error;
pub mod normalize;
pub mod notify;
pub mod report;
pub mod summary;
pub mod types;
pub mod workbook;

pub use cell::CellFormatter;
pub use classify::looks_like_kpi;
pub use error::{Error, Result};
pub use normalize::{linearize, SheetNormalizer};
pub use notify::{Notifier, OutboundMessage, StatusReport};
pub use report::{MemoReport, ReportRenderer, TextReportRenderer};
pub use summary::{truncate_chars, Summarizer, FALLBACK_SUMMARY};
pub use types::{DocumentFormat, Grid, RawCell, SheetReport, KPI_ANNOTATION};
pub use workbook::{InMemoryWorkbook, WorkbookExtractor, WorkbookSource, NO_DATA_SENTINEL};
