//! Outbound mail relay capability.
//!
//! The rest of the crate only sees [`MailRelay`]; [`SmtpRelay`] is the production
//! implementation.

use async_trait::async_trait;

pub mod smtp;

pub use smtp::{SmtpRelay, SmtpSettings};

/// A fully rendered message ready for the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    /// Recipients hidden from every other recipient.
    pub bcc: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Email authentication failed. Please check credentials.")]
    Authentication(String),
    #[error("invalid mail address `{address}`: {reason}")]
    Address { address: String, reason: String },
    #[error("mail relay error: {0}")]
    Transport(String),
}

/// Whether `address` is a bare `local@domain` mailbox the relay can deliver to.
pub fn is_valid_address(address: &str) -> bool {
    address.parse::<lettre::Address>().is_ok()
}

#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError>;

    /// Checks that the relay is reachable and accepts our credentials.
    async fn check(&self) -> Result<(), RelayError> {
        Ok(())
    }
}
