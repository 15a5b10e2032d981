//! DOCX file parser implementation.

use mailer_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Path of the main document part inside the archive.
const DOCUMENT_PART: &str = "word/document.xml";

/// Parser for DOCX (Office Open XML) files.
#[derive(Debug, Clone, Default)]
pub struct DocxParser {
    /// Whether paragraphs inside tables are included.
    include_tables: bool,
}

impl DocxParser {
    /// Create a parser that reads body paragraphs only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether paragraphs nested in tables are included.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Parse a DOCX archive and return its paragraph texts in document order,
    /// including blank ones.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let content = read_file_from_archive(&mut archive, DOCUMENT_PART)?;
        self.paragraphs_from_xml(&content)
    }

    /// Collect paragraph texts from the main document XML.
    fn paragraphs_from_xml(&self, xml_content: &str) -> Result<Vec<String>> {
        let mut paragraphs = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        let mut table_depth = 0usize;
        // Paragraphs in text boxes nest inside their anchor paragraph; only
        // the outermost one collects text.
        let mut paragraph_depth = 0usize;
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"tbl" => table_depth += 1,
                    b"p" => {
                        if paragraph_depth == 0 && self.accepts(table_depth) {
                            current = Some(String::new());
                        }
                        paragraph_depth += 1;
                    }
                    b"t" => in_text = paragraph_depth == 1,
                    _ if paragraph_depth == 1 => push_break(e, &mut current),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" if paragraph_depth == 0 && self.accepts(table_depth) => {
                        paragraphs.push(String::new())
                    }
                    _ if paragraph_depth == 1 => push_break(e, &mut current),
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        if let Some(text) = current.as_mut() {
                            let unescaped = e
                                .unescape()
                                .map_err(|err| Error::XmlError(err.to_string()))?;
                            text.push_str(&unescaped);
                        }
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    b"p" => {
                        paragraph_depth = paragraph_depth.saturating_sub(1);
                        if paragraph_depth == 0 {
                            if let Some(text) = current.take() {
                                paragraphs.push(text);
                            }
                        }
                    }
                    b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::DocxParse(format!(
                        "Error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }

    fn accepts(&self, table_depth: usize) -> bool {
        table_depth == 0 || self.include_tables
    }
}

/// Tabs and line breaks inside a run become `\t` and `\n`.
fn push_break(e: &BytesStart, current: &mut Option<String>) {
    if let Some(text) = current.as_mut() {
        match local_name(e.name().as_ref()) {
            b"tab" => text.push('\t'),
            b"br" | b"cr" => text.push('\n'),
            _ => {}
        }
    }
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract the text of a .docx file: non-blank paragraphs joined by newlines.
pub fn extract_text(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let paragraphs = DocxParser::new().parse(BufReader::new(file))?;

    log::debug!("Read {} paragraphs from {}", paragraphs.len(), path.display());

    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}
