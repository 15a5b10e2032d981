//! Delivery of report messages: directly over SMTP, or spooled into an
//! outbox directory when no mail server is configured.

pub mod message;
pub mod smtp;
pub mod spool;

pub use message::{build_message, DEFAULT_SENDER};
pub use smtp::{SmtpNotifier, DEFAULT_SMTP_PORT};
pub use spool::SpoolNotifier;
