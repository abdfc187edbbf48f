use std::future::Future;

use forge_models::{
    contact::{ContactForm, ContactFormErrors, ContactSubmission},
    notification::Notification,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a raw contact form and, if it is valid, send it to the
    /// operators. Never fails; every failure is reported via the outcome.
    fn submit(&self, form: ContactForm) -> impl Future<Output = ContactSubmitOutcome> + Send;

    /// Send a validated submission to the operators.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    /// The message has been handed over to the mail server.
    Sent,
    /// The form has been rejected and should be shown again.
    Invalid {
        form: ContactForm,
        errors: ContactFormErrors,
    },
    /// The form was valid, but the message could not be sent.
    SendFailed,
}

impl ContactSubmitOutcome {
    /// The one-shot notification to show on the next rendered page.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Sent => Some(Notification::ContactMessageSent),
            Self::Invalid { .. } => None,
            Self::SendFailed => Some(Notification::ContactMessageFailed),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(mut self, form: ContactForm, result: ContactSubmitOutcome) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
