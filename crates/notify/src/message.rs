//! MIME message construction.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use mailer_core::{Error, OutboundMessage, Result};
use std::fs;
use std::path::Path;

/// `From:` address used when no sender is configured.
pub const DEFAULT_SENDER: &str = "report-mailer@localhost";

/// Build a multipart message: a plain-text body plus the attachment, if it
/// exists on disk.
pub fn build_message(message: &OutboundMessage, from: &str) -> Result<Message> {
    let from: Mailbox = from
        .parse()
        .map_err(|e| Error::Notify(format!("Invalid sender '{}': {}", from, e)))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| Error::Notify(format!("Invalid recipient '{}': {}", message.to, e)))?;

    let mut body = MultiPart::mixed().singlepart(SinglePart::plain(message.body.clone()));

    match &message.attachment {
        Some(path) if path.exists() => {
            body = body.singlepart(attachment_part(path)?);
            log::info!("Attached file: {}", path.display());
        }
        Some(path) => {
            log::warn!("Attachment not found, sending without it: {}", path.display());
        }
        None => {}
    }

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .multipart(body)
        .map_err(|e| Error::Notify(format!("Failed to build message: {}", e)))
}

fn attachment_part(path: &Path) -> Result<SinglePart> {
    let bytes = fs::read(path).map_err(|e| {
        Error::Notify(format!("Failed to read attachment {}: {}", path.display(), e))
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    let content_type = ContentType::parse(content_type(path))
        .map_err(|e| Error::Notify(format!("Invalid content type: {}", e)))?;

    Ok(Attachment::new(filename).body(bytes, content_type))
}

/// MIME type for an attachment, by extension.
fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
