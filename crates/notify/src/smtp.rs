//! SMTP delivery with STARTTLS and login.

use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use mailer_core::{Error, Notifier, OutboundMessage, Result};
use std::time::Duration;

use crate::message::build_message;

/// Submission port used when none is given.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Sends messages through an SMTP relay, upgrading the connection with
/// STARTTLS and logging in as the sender.
pub struct SmtpNotifier {
    server: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl SmtpNotifier {
    /// Create a notifier for `server`; `username` is also the `From:` address.
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_SMTP_PORT,
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the server port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the connection and command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Deliver `message`, surfacing build and transport errors.
    pub fn try_send(&self, message: &OutboundMessage) -> Result<()> {
        let email = build_message(message, &self.username)?;

        let transport = SmtpTransport::starttls_relay(&self.server)
            .map_err(|e| Error::Notify(format!("Invalid SMTP server '{}': {}", self.server, e)))?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        log::debug!("Sending to {} via {}:{}", message.to, self.server, self.port);

        transport
            .send(&email)
            .map_err(|e| Error::Notify(format!("SMTP delivery failed: {}", e)))?;

        Ok(())
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, message: &OutboundMessage) -> bool {
        match self.try_send(message) {
            Ok(()) => {
                log::info!("Email sent to {}", message.to);
                true
            }
            Err(e) => {
                log::error!("Failed to send email to {}: {}", message.to, e);
                false
            }
        }
    }
}
