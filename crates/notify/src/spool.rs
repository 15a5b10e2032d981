//! Outbox spooling for hosts without a configured mail server.

use chrono::Local;
use mailer_core::report::versioned_path;
use mailer_core::{Error, Notifier, OutboundMessage, Result};
use std::fs;
use std::path::PathBuf;

use crate::message::{build_message, DEFAULT_SENDER};

/// Writes messages as `.eml` files into an outbox directory, for pickup by
/// the host's mail transfer agent.
#[derive(Debug, Clone)]
pub struct SpoolNotifier {
    outbox: PathBuf,
    sender: String,
}

impl SpoolNotifier {
    /// Create a notifier spooling into `outbox` (created on demand).
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: outbox.into(),
            sender: DEFAULT_SENDER.to_string(),
        }
    }

    /// Set the `From:` address.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Spool `message` and return the written file's path.
    pub fn spool(&self, message: &OutboundMessage) -> Result<PathBuf> {
        let email = build_message(message, &self.sender)?;

        fs::create_dir_all(&self.outbox)
            .map_err(|e| Error::Notify(format!("Failed to create outbox: {}", e)))?;

        let stem = format!("message_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let path = versioned_path(&self.outbox, &stem, "eml");

        fs::write(&path, email.formatted())
            .map_err(|e| Error::Notify(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(path)
    }
}

impl Notifier for SpoolNotifier {
    fn send(&self, message: &OutboundMessage) -> bool {
        match self.spool(message) {
            Ok(path) => {
                log::info!("Email to {} queued at {}", message.to, path.display());
                true
            }
            Err(e) => {
                log::error!("Failed to queue email to {}: {}", message.to, e);
                false
            }
        }
    }
}
