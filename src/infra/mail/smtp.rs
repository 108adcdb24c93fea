// SMTP relay client built on lettre's tokio transport.

use super::{MailRelay, OutgoingMail, RelayError};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Port that selects STARTTLS instead of implicit TLS.
const SUBMISSION_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn new(settings: &SmtpSettings) -> Result<Self, RelayError> {
        let builder = if settings.port == SUBMISSION_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        }
        .map_err(|e| RelayError::Transport(e.to_string()))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, RelayError> {
    address.parse::<Mailbox>().map_err(|e| RelayError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn build_message(mail: &OutgoingMail) -> Result<Message, RelayError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&mail.from)?)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_HTML);

    for to in &mail.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    // One bad blind copy must not sink the whole message.
    for bcc in &mail.bcc {
        match parse_mailbox(bcc) {
            Ok(mailbox) => builder = builder.bcc(mailbox),
            Err(e) => tracing::warn!(error = %e, "skipping undeliverable bcc recipient"),
        }
    }

    builder
        .body(mail.html.clone())
        .map_err(|e| RelayError::Transport(e.to_string()))
}

fn classify(error: lettre::transport::smtp::Error) -> RelayError {
    // 535: authentication credentials invalid
    let auth_rejected = error
        .status()
        .is_some_and(|code| code.to_string() == "535");
    if auth_rejected {
        RelayError::Authentication(error.to_string())
    } else {
        RelayError::Transport(error.to_string())
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        let message = build_message(&mail)?;
        self.transport.send(message).await.map_err(classify)?;
        Ok(())
    }

    async fn check(&self) -> Result<(), RelayError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(RelayError::Transport("relay refused the connection".to_string())),
            Err(e) => Err(classify(e)),
        }
    }
}
