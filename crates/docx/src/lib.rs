//! DOCX (Office Open XML) text extractor.
//!
//! Reads the main document part of a .docx ZIP archive and returns its
//! non-blank paragraphs, one per line.

pub mod parser;

pub use parser::{extract_text, DocxParser};
