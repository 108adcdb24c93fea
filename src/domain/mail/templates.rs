//! HTML bodies for transactional mail.

use super::Branding;

/// Message kinds the site sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTemplate {
    /// Sent after a newsletter signup.
    Welcome { email: String },
    ContactAck {
        name: String,
        email: String,
        phone: String,
    },
    QuoteAck {
        name: String,
        email: String,
        phone: String,
        product: String,
        message: String,
    },
    /// One message to every subscriber, each hidden from the others.
    BulkNewsletter {
        recipients: Vec<String>,
        subject: String,
        message: String,
    },
}

/// Who a rendered message goes to, plus its subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub to: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl MailTemplate {
    pub fn kind(&self) -> &'static str {
        match self {
            MailTemplate::Welcome { .. } => "welcome",
            MailTemplate::ContactAck { .. } => "contact-ack",
            MailTemplate::QuoteAck { .. } => "quote-ack",
            MailTemplate::BulkNewsletter { .. } => "bulk-newsletter",
        }
    }

    pub fn render(&self, brand: &Branding) -> RenderedMail {
        let company = escape_html(&brand.company);
        let site = escape_html(&brand.site_url);
        let office = escape_html(&brand.office_email);

        match self {
            MailTemplate::Welcome { email } => RenderedMail {
                to: vec![email.clone()],
                bcc: Vec::new(),
                subject: format!("Thank you for subscribing to {}!", brand.company),
                html: format!(
                    r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h2 style="color: #007bff;">Welcome to {company}!</h2>
  <p>Hi there,</p>
  <p>Thank you for subscribing to our newsletter! We're thrilled to have you on board.</p>
  <p>Stay tuned for updates on our latest surgical innovations, cleanroom solutions, and healthcare infrastructure services.</p>
  <a href="{site}" style="display:inline-block; margin: 15px 0; padding: 10px 20px; background-color: #007bff; color: white; text-decoration: none; border-radius: 5px;">Visit Our Website</a>
  <p>Warm regards,<br>Team {company}</p>
  <hr>
  <p style="font-size: 12px; color: #999;">This email was sent by {office}</p>
</div>"#
                ),
            },
            MailTemplate::ContactAck { name, email, phone } => RenderedMail {
                to: vec![email.clone()],
                bcc: Vec::new(),
                subject: format!("Thanks for Contacting {}!", brand.company),
                html: format!(
                    r#"<div style="font-family: Arial, sans-serif; color: #333; max-width: 600px; margin: auto;">
  <h2 style="color: #007B8F;">Hello {name},</h2>
  <p>Thank you for reaching out to <strong>{company}</strong>. We've received your request and one of our representatives will get in touch with you shortly.</p>
  <p><strong>Your Provided Number:</strong> {phone}</p>
  <p><strong>Contact Us Directly:</strong> <a href="tel:{phone_link}">{phone_display}</a></p>
  <p>Visit us at: <a href="{site}" target="_blank">{site}</a></p>
  <br/>
  <p>Regards,<br/><strong>Team {company}</strong><br/><a href="mailto:{office}">{office}</a></p>
  <hr style="margin-top: 30px;" />
  <p style="font-size: 12px; color: #999;">This is an automated message. Please do not reply.</p>
</div>"#,
                    name = escape_html(name),
                    phone = escape_html(phone),
                    phone_link = escape_html(&brand.phone_link),
                    phone_display = escape_html(&brand.phone_display),
                ),
            },
            MailTemplate::QuoteAck {
                name,
                email,
                phone,
                product,
                message,
            } => RenderedMail {
                to: vec![email.clone()],
                bcc: Vec::new(),
                subject: format!("Quote Request Received - {}", brand.company),
                html: format!(
                    r#"<h2>Thank You, {name}!</h2>
<p>We've received your quote request for <strong>{product}</strong>.</p>
<p>Our team will reach out to you soon at <strong>{phone}</strong>.</p>
<br/>
<p><em>Your message:</em> {message}</p>"#,
                    name = escape_html(name),
                    product = escape_html(product),
                    phone = escape_html(phone),
                    message = escape_html(message),
                ),
            },
            MailTemplate::BulkNewsletter {
                recipients,
                subject,
                message,
            } => RenderedMail {
                to: Vec::new(),
                bcc: recipients.clone(),
                subject: subject.clone(),
                html: format!(
                    r#"<p>{message}</p><br><p>Visit us at <a href="{site}">{site_label}</a></p>"#,
                    message = escape_html(message),
                    site_label = escape_html(brand.site_label()),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_text_is_escaped() {
        let rendered = MailTemplate::ContactAck {
            name: "<script>alert(1)</script>".to_string(),
            email: "a@x.com".to_string(),
            phone: "123".to_string(),
        }
        .render(&Branding::default());

        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.html.contains("&lt;script&gt;"));
        assert_eq!(rendered.to, vec!["a@x.com"]);
    }

    #[test]
    fn bulk_newsletter_only_uses_bcc() {
        let rendered = MailTemplate::BulkNewsletter {
            recipients: vec!["a@x.com".to_string(), "b@y.com".to_string()],
            subject: "Monthly update".to_string(),
            message: "New cleanroom range".to_string(),
        }
        .render(&Branding::default());

        assert!(rendered.to.is_empty());
        assert_eq!(rendered.bcc.len(), 2);
        assert_eq!(rendered.subject, "Monthly update");
        assert!(rendered.html.contains("<p>New cleanroom range</p>"));
    }

    #[test]
    fn quote_ack_mentions_the_product() {
        let rendered = MailTemplate::QuoteAck {
            name: "Meera".to_string(),
            email: "m@x.com".to_string(),
            phone: "555".to_string(),
            product: "Autoclave".to_string(),
            message: "Two units".to_string(),
        }
        .render(&Branding::default());

        assert!(rendered.subject.starts_with("Quote Request Received"));
        assert!(rendered.html.contains("<strong>Autoclave</strong>"));
    }
}
