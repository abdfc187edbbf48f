use anyhow::ensure;
use clap::Subcommand;
use forge_config::Config;
use forge_email_contracts::{ContentType, Email, EmailService};
use forge_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test {
        /// Recipients of the test email, defaults to the contact form recipients
        recipients: Vec<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipients } => test(config, recipients).await,
        }
    }
}

async fn test(config: Config, recipients: Vec<EmailAddressWithName>) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let recipients = if recipients.is_empty() {
        config.contact.recipients
    } else {
        recipients
    };

    let ok = email_service
        .send(Email {
            recipients,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
