//! Transactional mail: rendering templates and handing them to the relay.

use crate::infra::mail::{MailRelay, OutgoingMail, RelayError};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub mod templates;

pub use templates::{MailTemplate, RenderedMail};

/// Company details printed in every message.
#[derive(Debug, Clone)]
pub struct Branding {
    pub company: String,
    pub site_url: String,
    pub office_email: String,
    pub phone_display: String,
    pub phone_link: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company: "Global Care Surgicals".to_string(),
            site_url: "https://www.globalcaresurgicals.in".to_string(),
            office_email: "office@globalcaresurgicals.in".to_string(),
            phone_display: "94831 75375".to_string(),
            phone_link: "+919483175375".to_string(),
        }
    }
}

impl Branding {
    /// Site URL without scheme or `www.`, for link text.
    pub fn site_label(&self) -> &str {
        let url = self.site_url.trim_end_matches('/');
        let url = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        url.strip_prefix("www.").unwrap_or(url)
    }
}

#[derive(Clone)]
pub struct MailDispatcher {
    relay: Arc<dyn MailRelay>,
    sender: String,
    brand: Arc<Branding>,
}

impl MailDispatcher {
    pub fn new(relay: Arc<dyn MailRelay>, sender: impl Into<String>, brand: Branding) -> Self {
        Self {
            relay,
            sender: sender.into(),
            brand: Arc::new(brand),
        }
    }

    pub fn relay(&self) -> &Arc<dyn MailRelay> {
        &self.relay
    }

    /// Renders `template` and waits for the relay to accept it.
    pub async fn send(&self, template: MailTemplate) -> Result<(), RelayError> {
        let kind = template.kind();
        let rendered = template.render(&self.brand);
        let recipients = rendered.to.len() + rendered.bcc.len();

        let mail = OutgoingMail {
            from: self.sender.clone(),
            to: rendered.to,
            bcc: rendered.bcc,
            subject: rendered.subject,
            html: rendered.html,
        };

        match self.relay.send(mail).await {
            Ok(()) => {
                tracing::info!(kind, recipients, "mail sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(kind, recipients, error = %e, "mail send failed");
                Err(e)
            }
        }
    }

    /// Sends `template` on a detached task.
    ///
    /// The caller never observes the outcome; failures are only logged. There is no
    /// retry, timeout or cancellation.
    pub fn send_detached(&self, template: MailTemplate) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            // `send` already logs the failure.
            let _ = dispatcher.send(template).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<OutgoingMail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailRelay for Outbox {
        async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
            if self.fail {
                return Err(RelayError::Transport("connection refused".to_string()));
            }
            self.sent.lock().await.push(mail);
            Ok(())
        }
    }

    #[tokio::test]
    async fn send_uses_the_configured_sender() {
        let outbox = Arc::new(Outbox::default());
        let dispatcher = MailDispatcher::new(outbox.clone(), "Office <office@x.com>", Branding::default());

        dispatcher
            .send(MailTemplate::Welcome {
                email: "new@reader.com".to_string(),
            })
            .await
            .unwrap();

        let sent = outbox.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "Office <office@x.com>");
        assert_eq!(sent[0].to, vec!["new@reader.com"]);
    }

    #[tokio::test]
    async fn detached_failures_are_swallowed() {
        let outbox = Arc::new(Outbox {
            fail: true,
            ..Default::default()
        });
        let dispatcher = MailDispatcher::new(outbox, "office@x.com", Branding::default());

        let handle = dispatcher.send_detached(MailTemplate::Welcome {
            email: "new@reader.com".to_string(),
        });
        assert!(handle.await.is_ok());
    }

    #[test]
    fn site_label_strips_scheme_and_www() {
        assert_eq!(Branding::default().site_label(), "globalcaresurgicals.in");
    }
}
