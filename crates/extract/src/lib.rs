//! Document dispatcher: picks a text extractor by file extension.

use mailer_core::{DocumentFormat, Result};
use std::path::Path;

/// Extract plain text from a `.docx`, `.pdf`, or `.xlsx` file.
///
/// The extension is matched case-insensitively. Anything else fails with
/// [`Error::UnsupportedFormat`](mailer_core::Error::UnsupportedFormat)
/// carrying the rejected extension. Spreadsheet read failures do not fail:
/// they come back as `Failed to parse Excel file: <cause>` text.
pub fn process(path: &Path) -> Result<String> {
    let format = DocumentFormat::from_path(path)?;
    log::info!("Processing {} as {}", path.display(), format.extension());

    match format {
        DocumentFormat::Docx => mailer_docx::extract_text(path),
        DocumentFormat::Pdf => mailer_pdf::extract_text(path),
        DocumentFormat::Xlsx => Ok(mailer_xlsx::extract_text(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailer_core::Error;
    use std::fs::File;
    use std::io::Write;
    use zip::write::FileOptions;

    #[test]
    fn test_unsupported_extension() {
        match process(Path::new("report.txt")) {
            Err(Error::UnsupportedFormat(ext)) => assert_eq!(ext, ".txt"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_error_message() {
        let err = process(Path::new("notes.md")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .md");
    }

    #[test]
    fn test_uppercase_extension_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MEMO.DOCX");

        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("word/document.xml", FileOptions::default()).unwrap();
        zip.write_all(
            br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello board</w:t></w:r></w:p></w:body></w:document>"#,
        )
        .unwrap();
        zip.finish().unwrap();

        assert_eq!(process(&path).unwrap(), "Hello board");
    }

    #[test]
    fn test_unreadable_spreadsheet_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");
        std::fs::write(&path, "garbage").unwrap();

        let text = process(&path).unwrap();
        assert!(text.starts_with("Failed to parse Excel file: "));
    }

    #[test]
    fn test_missing_docx_is_error() {
        assert!(matches!(
            process(Path::new("/nonexistent/memo.docx")),
            Err(Error::IoError(_))
        ));
    }
}
