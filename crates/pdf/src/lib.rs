//! PDF text extractor.
//!
//! A thin layer over `pdf-extract`: page texts joined by newlines.

use mailer_core::{Error, Result};
use std::path::Path;

/// Extract the text of every page, in page order.
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    log::debug!("Read {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// Extract the text of a PDF: page texts joined by newlines.
pub fn extract_text(path: &Path) -> Result<String> {
    Ok(join_pages(&extract_pages(path)?))
}

/// Join page texts with newline separators.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
