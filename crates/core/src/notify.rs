//! Outbound notifications and delivery status reports.

use std::path::PathBuf;

/// A message to deliver, with an optional file attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Recipient address.
    pub to: String,
    /// File to attach; skipped with a warning if it does not exist.
    pub attachment: Option<PathBuf>,
}

impl OutboundMessage {
    /// Create a message without an attachment.
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            to: to.into(),
            attachment: None,
        }
    }

    /// Attach a file.
    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachment = Some(path.into());
        self
    }
}

/// Delivers outbound messages.
///
/// Reports success as a boolean and never propagates failures.
pub trait Notifier {
    /// Deliver `message`, returning whether it was accepted.
    fn send(&self, message: &OutboundMessage) -> bool;
}

/// Outcome summary sent to an administrator after a delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Input document the report was built from.
    pub file: String,
    /// Recipient of the report message.
    pub recipient: String,
    /// Whether the report message was accepted.
    pub delivered: bool,
    /// Summary included in the report.
    pub summary: String,
}

impl StatusReport {
    /// `SUCCESS` or `FAILED`.
    pub fn status(&self) -> &'static str {
        if self.delivered {
            "SUCCESS"
        } else {
            "FAILED"
        }
    }

    /// Subject line, e.g. `[STATUS] Report Mailer - SUCCESS`.
    pub fn subject(&self) -> String {
        format!("[STATUS] Report Mailer - {}", self.status())
    }

    /// Body listing file, recipient, status and summary.
    pub fn body(&self) -> String {
        format!(
            "Report Summary Sent:\n\nFile: {}\nRecipient: {}\nStatus: {}\nSummary: {}\n",
            self.file,
            self.recipient,
            self.status(),
            self.summary
        )
    }

    /// Build the status message addressed to `to`.
    pub fn to_message(&self, to: impl Into<String>) -> OutboundMessage {
        OutboundMessage::new(self.subject(), self.body(), to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_report_success() {
        let status = StatusReport {
            file: "q1.xlsx".to_string(),
            recipient: "board@example.com".to_string(),
            delivered: true,
            summary: "Revenue grew.".to_string(),
        };

        assert_eq!(status.subject(), "[STATUS] Report Mailer - SUCCESS");
        let body = status.body();
        assert!(body.contains("File: q1.xlsx"));
        assert!(body.contains("Recipient: board@example.com"));
        assert!(body.contains("Status: SUCCESS"));
        assert!(body.contains("Summary: Revenue grew."));

        let message = status.to_message("admin@example.com");
        assert_eq!(message.to, "admin@example.com");
        assert_eq!(message.attachment, None);
    }

    #[test]
    fn test_status_report_failed() {
        let status = StatusReport {
            file: "a.pdf".to_string(),
            recipient: "x@example.com".to_string(),
            delivered: false,
            summary: String::new(),
        };
        assert_eq!(status.status(), "FAILED");
        assert_eq!(status.subject(), "[STATUS] Report Mailer - FAILED");
    }
}
