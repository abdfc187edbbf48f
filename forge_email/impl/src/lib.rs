use std::time::Duration;

use anyhow::anyhow;
use forge_email_contracts::{ContentType, Email, EmailService};
use forge_models::email_address::EmailAddressWithName;
use forge_utils::Apply;
use lettre::{
    message::header,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub fn new(url: &str, from: EmailAddressWithName, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .apply_map(timeout, |builder, timeout| builder.timeout(Some(timeout)))
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        if email.recipients.is_empty() {
            return Err(anyhow!("Email has no recipients"));
        }

        Message::builder()
            .from(self.from.0.clone())
            .apply_each(email.recipients, |builder, recipient| builder.to(recipient.0))
            .apply_map(email.reply_to, |builder, reply_to| builder.reply_to(reply_to.0))
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        let response = self.transport.send(message).await?;
        let ok = response.is_positive();
        if ok {
            debug!(code = %response.code(), "email accepted by smtp server");
        } else {
            warn!(code = %response.code(), "email rejected by smtp server");
        }

        Ok(ok)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(
            "smtp://localhost",
            "Forge <noreply@example.com>".parse().unwrap(),
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn build_message() {
        // Arrange
        let email = Email {
            recipients: vec![
                "info@example.com".parse().unwrap(),
                "team@example.com".parse().unwrap(),
            ],
            subject: "Contact Form: Test".into(),
            body: "From: John Doe <john@example.com>\n\nHi".into(),
            content_type: ContentType::Text,
            reply_to: Some("john@example.com".parse().unwrap()),
        };

        // Act
        let message = sut().build_message(email).unwrap();

        // Assert
        let recipients = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(recipients, ["info@example.com", "team@example.com"]);
        assert_eq!(
            message.envelope().from().map(ToString::to_string).as_deref(),
            Some("noreply@example.com")
        );

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: Contact Form: Test\r\n"));
        assert!(formatted.contains("Reply-To: john@example.com\r\n"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("From: John Doe <john@example.com>"));
    }

    #[tokio::test]
    async fn no_recipients() {
        let email = Email {
            recipients: Vec::new(),
            subject: "Subject".into(),
            body: "Body".into(),
            content_type: ContentType::Html,
            reply_to: None,
        };

        assert!(sut().build_message(email).is_err());
    }
}
