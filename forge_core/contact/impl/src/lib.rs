use std::sync::Arc;

use forge_core_contact_contracts::{
    ContactFeatureService, ContactSendMessageError, ContactSubmitOutcome,
};
use forge_email_contracts::{ContentType, Email, EmailService};
use forge_models::{
    contact::{ContactForm, ContactSubmission},
    email_address::EmailAddressWithName,
};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The operators receiving the contact messages.
    pub recipients: Arc<[EmailAddressWithName]>,
    /// Prepended to the subject entered by the user.
    pub subject_prefix: Arc<str>,
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn submit(&self, form: ContactForm) -> ContactSubmitOutcome {
        let submission = match form.validate() {
            Ok(submission) => submission,
            Err(errors) => return ContactSubmitOutcome::Invalid { form, errors },
        };

        match self.send_message(submission).await {
            Ok(()) => {
                info!("Contact message sent");
                ContactSubmitOutcome::Sent
            }
            Err(err) => {
                error!("Failed to send contact message: {err}");
                ContactSubmitOutcome::SendFailed
            }
        }
    }

    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let email = Email {
            recipients: self.config.recipients.to_vec(),
            subject: format!("{}{}", self.config.subject_prefix, *submission.subject),
            body: format!(
                "From: {} <{}>\n\n{}",
                *submission.name, submission.email, *submission.message
            ),
            content_type: ContentType::Text,
            reply_to: Some(submission.email.into()),
        };

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        Ok(())
    }
}
