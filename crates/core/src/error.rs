//! Error types for document extraction and report delivery.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting, summarizing, or delivering a report.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file extension is not one of the recognized document formats.
    /// Carries the rejected extension including its leading dot (e.g. `.txt`).
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Failed to open or iterate a spreadsheet workbook.
    #[error("{0}")]
    SpreadsheetParse(String),

    /// Failed to parse the DOCX file structure.
    #[error("DOCX parsing error: {0}")]
    DocxParse(String),

    /// Failed to extract text from a PDF.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// ZIP archive error (for DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for DOCX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The summarization backend rejected or failed the request.
    #[error("Summarization error: {0}")]
    Summarize(String),

    /// Writing the rendered report failed.
    #[error("Report rendering error: {0}")]
    Render(String),

    /// Queuing an outbound message failed.
    #[error("Notification error: {0}")]
    Notify(String),
}
